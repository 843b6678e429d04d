//! Road network construction from GeoJSON `LineString` features

use std::path::Path;

use geo::{Coord, Distance, Haversine, LineString, Point};
use geojson::{Feature, FeatureCollection, GeoJson};
use hashbrown::HashMap;
use itertools::Itertools;
use log::info;
use petgraph::graph::{Graph, NodeIndex};
use serde_json::Value as JsonValue;

use super::NetworkConfig;
use crate::{
    Error,
    model::{RoadNetwork, RoadNode, RoadSegment},
};

/// Loads a road network from a GeoJSON file of `LineString` features
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid GeoJSON,
/// or the configured speed is not positive.
pub fn load_road_network(path: &Path, config: &NetworkConfig) -> Result<RoadNetwork, Error> {
    info!("Processing road data: {}", path.display());
    let raw = std::fs::read_to_string(path)?;
    road_network_from_geojson(&raw, config)
}

/// Builds a road network from a GeoJSON string.
///
/// Every consecutive coordinate pair of every `LineString` feature
/// becomes a directed segment weighted by its great-circle length over
/// the configured speed. Endpoints are interned, so shared junction
/// coordinates collapse into a single graph node. Features with a
/// truthy `oneway` property contribute arcs in coordinate order only.
pub fn road_network_from_geojson(
    raw: &str,
    config: &NetworkConfig,
) -> Result<RoadNetwork, Error> {
    if config.speed_mph <= 0.0 {
        return Err(Error::InvalidData(format!(
            "travel speed must be positive, got {} mph",
            config.speed_mph
        )));
    }

    let geojson = raw
        .parse::<GeoJson>()
        .map_err(|e| Error::GeoJsonError(e.to_string()))?;
    let collection = FeatureCollection::try_from(geojson)
        .map_err(|e| Error::GeoJsonError(e.to_string()))?;

    let speed_mps = config.speed_mps();
    let mut builder = GraphBuilder::default();
    let mut skipped = 0usize;

    for feature in &collection.features {
        let Some(line) = feature_linestring(feature) else {
            skipped += 1;
            continue;
        };
        let oneway = config.respect_oneway && is_oneway(feature);

        for (start, end) in line.coords().copied().tuple_windows() {
            builder.add_segment(start, end, speed_mps);
            if !oneway {
                builder.add_segment(end, start, speed_mps);
            }
        }
    }

    let graph = builder.graph;
    info!(
        "Built road network: {} nodes, {} segments ({} non-LineString features skipped)",
        graph.node_count(),
        graph.edge_count(),
        skipped
    );

    Ok(RoadNetwork::new(graph))
}

#[derive(Default)]
struct GraphBuilder {
    graph: Graph<RoadNode, RoadSegment>,
    interned: HashMap<(u64, u64), NodeIndex>,
}

impl GraphBuilder {
    fn node(&mut self, coord: Coord<f64>) -> NodeIndex {
        match self
            .interned
            .entry((coord.x.to_bits(), coord.y.to_bits()))
        {
            hashbrown::hash_map::Entry::Occupied(entry) => *entry.get(),
            hashbrown::hash_map::Entry::Vacant(entry) => {
                let node = self.graph.add_node(RoadNode {
                    geometry: Point::from(coord),
                });
                entry.insert(node);
                node
            }
        }
    }

    fn add_segment(&mut self, start: Coord<f64>, end: Coord<f64>, speed_mps: f64) {
        let length = Haversine.distance(Point::from(start), Point::from(end));
        // Zero-length segments still connect their endpoints, at no cost
        let travel_time = if length > 0.0 { length / speed_mps } else { 0.0 };

        let from = self.node(start);
        let to = self.node(end);
        self.graph.add_edge(
            from,
            to,
            RoadSegment {
                travel_time,
                geometry: LineString::new(vec![start, end]),
            },
        );
    }
}

fn feature_linestring(feature: &Feature) -> Option<LineString<f64>> {
    let geometry = feature.geometry.as_ref()?;
    LineString::try_from(geometry.value.clone()).ok()
}

fn is_oneway(feature: &Feature) -> bool {
    match feature.property("oneway") {
        Some(JsonValue::Bool(flag)) => *flag,
        Some(JsonValue::String(s)) => matches!(s.as_str(), "yes" | "true" | "1"),
        Some(JsonValue::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    }
}
