//! GeoJSON export of computed service areas

use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::{Error, algo::isochrone::ServiceArea};

/// Converts one service area to a GeoJSON Feature carrying the time
/// budget, the reached node count, and an optional source name.
pub fn service_area_to_feature(
    area: &ServiceArea,
    source_name: Option<&str>,
) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&area.polygon));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "travel_time": area.time_limit,
            "reached_nodes": area.reached_nodes,
            "source": source_name,
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

/// Assembles a `FeatureCollection` from `(source name, service area)`
/// pairs, preserving iteration order.
pub fn service_areas_to_geojson<'a, I>(areas: I) -> Result<FeatureCollection, Error>
where
    I: IntoIterator<Item = (Option<&'a str>, &'a ServiceArea)>,
{
    let features = areas
        .into_iter()
        .map(|(name, area)| service_area_to_feature(area, name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn to_geojson_string(collection: &FeatureCollection) -> Result<String, Error> {
    serde_json::to_string(collection).map_err(|e| Error::GeoJsonError(e.to_string()))
}
