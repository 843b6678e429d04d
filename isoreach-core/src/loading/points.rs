//! Source locations (schools, stations) from GeoJSON `Point` features

use std::path::Path;

use geo::Point;
use geojson::{FeatureCollection, GeoJson};
use log::{info, warn};
use serde_json::Value as JsonValue;

use crate::Error;

/// A source location to snap onto the network
#[derive(Debug, Clone)]
pub struct NamedPoint {
    /// Value of the feature's `name` property, if present
    pub name: Option<String>,
    pub geometry: Point<f64>,
}

/// Loads source locations from a GeoJSON file of `Point` features
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid GeoJSON.
pub fn load_points(path: &Path) -> Result<Vec<NamedPoint>, Error> {
    info!("Processing source locations: {}", path.display());
    let raw = std::fs::read_to_string(path)?;
    points_from_geojson(&raw)
}

/// Parses `Point` features out of a GeoJSON string, keeping the `name`
/// property. Non-point features are skipped with a warning.
pub fn points_from_geojson(raw: &str) -> Result<Vec<NamedPoint>, Error> {
    let geojson = raw
        .parse::<GeoJson>()
        .map_err(|e| Error::GeoJsonError(e.to_string()))?;
    let collection = FeatureCollection::try_from(geojson)
        .map_err(|e| Error::GeoJsonError(e.to_string()))?;

    let mut points = Vec::with_capacity(collection.features.len());
    let mut skipped = 0usize;

    for feature in collection.features {
        let geometry = feature
            .geometry
            .as_ref()
            .and_then(|g| Point::try_from(g.value.clone()).ok());
        let Some(geometry) = geometry else {
            skipped += 1;
            continue;
        };

        let name = match feature.property("name") {
            Some(JsonValue::String(name)) => Some(name.clone()),
            _ => None,
        };

        points.push(NamedPoint { name, geometry });
    }

    if skipped > 0 {
        warn!("Skipped {skipped} non-Point source features");
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use geo::point;

    use super::*;

    const SCHOOLS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-82.5, 28.3]},
                "properties": {"name": "Pine View Elementary"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-82.6, 28.4]},
                "properties": {}
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[0.0, 0.0], [1.0, 1.0]]
                },
                "properties": {"name": "not a point"}
            }
        ]
    }"#;

    #[test]
    fn reads_point_features_with_names() {
        let points = points_from_geojson(SCHOOLS).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].name.as_deref(), Some("Pine View Elementary"));
        assert_eq!(points[0].geometry, point!(x: -82.5, y: 28.3));
        assert_eq!(points[1].name, None);
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(matches!(
            points_from_geojson("[1, 2, 3]"),
            Err(Error::GeoJsonError(_))
        ));
    }
}
