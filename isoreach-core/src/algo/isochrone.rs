//! Isochrone (service area) polygons over the road network.
//!
//! An isochrone bounds everything reachable from a source node within a
//! travel-time budget. It is computed as the convex hull of the
//! coordinates of every node whose shortest travel time from the source
//! is at or below the budget.

use geo::{ConvexHull, LineString, MultiPoint, Point, Polygon};
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use crate::{Error, Seconds, model::RoadNetwork, routing::travel_times_from};

/// Convex-hull service area reachable within a time budget.
#[derive(Debug, Clone)]
pub struct ServiceArea {
    /// Budget the area was computed for, seconds
    pub time_limit: Seconds,
    /// Number of network nodes reachable within the budget
    pub reached_nodes: usize,
    /// Hull polygon. Zero-area when the reachable nodes are collinear
    /// or when a single node degenerates the hull to a point.
    pub polygon: Polygon<f64>,
}

/// Computes the service area reachable from `source` within `time_limit`
/// seconds.
///
/// The comparison against the budget is inclusive: a node at exactly
/// `time_limit` seconds qualifies. `Ok(None)` means no node qualified,
/// which is a defined outcome rather than an error.
///
/// # Errors
///
/// Returns [`Error::InvalidTimeBudget`] for a negative or non-finite
/// budget and [`Error::NodeNotFound`] when `source` is not a node of
/// `network`.
pub fn generate_isochrone(
    network: &RoadNetwork,
    source: NodeIndex,
    time_limit: Seconds,
) -> Result<Option<ServiceArea>, Error> {
    if !time_limit.is_finite() || time_limit < 0.0 {
        return Err(Error::InvalidTimeBudget(time_limit));
    }
    if !network.contains_node(source) {
        return Err(Error::NodeNotFound(source.index()));
    }

    let travel_times = travel_times_from(network, source, Some(time_limit));

    let reachable: Vec<Point<f64>> = travel_times
        .iter()
        .filter(|&(_, &time)| time <= time_limit)
        .filter_map(|(&node, _)| network.node_point(node))
        .collect();

    Ok(hull_of(reachable, time_limit))
}

/// Computes one service area per source, in input order, in parallel.
///
/// Each query only reads the shared network and writes its own result,
/// so the batch is embarrassingly parallel. The first failing source
/// aborts the batch.
pub fn bulk_isochrones(
    network: &RoadNetwork,
    sources: &[NodeIndex],
    time_limit: Seconds,
) -> Result<Vec<Option<ServiceArea>>, Error> {
    sources
        .par_iter()
        .map(|&source| generate_isochrone(network, source, time_limit))
        .collect()
}

fn hull_of(points: Vec<Point<f64>>, time_limit: Seconds) -> Option<ServiceArea> {
    let reached_nodes = points.len();
    let polygon = match points.as_slice() {
        [] => return None,
        // A single reachable node degenerates to a zero-area ring on
        // that point, by policy an explicit result rather than an error
        [only] => Polygon::new(LineString::from(vec![only.0, only.0, only.0]), vec![]),
        _ => MultiPoint::from(points).convex_hull(),
    };

    Some(ServiceArea {
        time_limit,
        reached_nodes,
        polygon,
    })
}

#[cfg(test)]
mod tests {
    use geo::{Area, CoordsIter, point};
    use hashbrown::HashSet;
    use petgraph::graph::Graph;

    use super::*;
    use crate::model::{RoadNode, RoadSegment};

    fn network(nodes: &[(f64, f64)], arcs: &[(usize, usize, f64)]) -> RoadNetwork {
        let mut graph: Graph<RoadNode, RoadSegment> = Graph::new();
        let indices: Vec<NodeIndex> = nodes
            .iter()
            .map(|&(x, y)| {
                graph.add_node(RoadNode {
                    geometry: point!(x: x, y: y),
                })
            })
            .collect();
        for &(from, to, travel_time) in arcs {
            let geometry = LineString::from(vec![nodes[from], nodes[to]]);
            graph.add_edge(
                indices[from],
                indices[to],
                RoadSegment {
                    travel_time,
                    geometry,
                },
            );
        }
        RoadNetwork::new(graph)
    }

    /// Three collinear nodes, 100 s per hop: A(0,0) -> B(1,0) -> C(2,0)
    fn collinear_chain() -> RoadNetwork {
        network(
            &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)],
            &[(0, 1, 100.0), (1, 2, 100.0)],
        )
    }

    fn hull_coords(area: &ServiceArea) -> HashSet<(i64, i64)> {
        area.polygon
            .exterior_coords_iter()
            .map(|c| (c.x.round() as i64, c.y.round() as i64))
            .collect()
    }

    #[test]
    fn zero_budget_admits_only_the_source() {
        let network = collinear_chain();

        let area = generate_isochrone(&network, NodeIndex::new(0), 0.0)
            .unwrap()
            .expect("source itself always qualifies");

        assert_eq!(area.reached_nodes, 1);
        assert_eq!(area.polygon.unsigned_area(), 0.0);
        assert_eq!(hull_coords(&area), HashSet::from([(0, 0)]));
    }

    #[test]
    fn budget_100_reaches_a_and_b() {
        let network = collinear_chain();

        let area = generate_isochrone(&network, NodeIndex::new(0), 100.0)
            .unwrap()
            .unwrap();

        // Inclusive boundary: B at exactly 100 s qualifies
        assert_eq!(area.reached_nodes, 2);
        assert_eq!(area.polygon.unsigned_area(), 0.0);
        assert_eq!(hull_coords(&area), HashSet::from([(0, 0), (1, 0)]));
    }

    #[test]
    fn budget_250_reaches_all_three_collinear_nodes() {
        let network = collinear_chain();

        let area = generate_isochrone(&network, NodeIndex::new(0), 250.0)
            .unwrap()
            .unwrap();

        assert_eq!(area.reached_nodes, 3);
        // Collinear hull has zero area but still spans A to C
        assert_eq!(area.polygon.unsigned_area(), 0.0);
        let coords = hull_coords(&area);
        assert!(coords.contains(&(0, 0)));
        assert!(coords.contains(&(2, 0)));
    }

    #[test]
    fn no_node_past_the_budget_is_ever_included() {
        let network = collinear_chain();

        let area = generate_isochrone(&network, NodeIndex::new(0), 150.0)
            .unwrap()
            .unwrap();

        assert!(!hull_coords(&area).contains(&(2, 0)));
    }

    #[test]
    fn reachable_set_grows_monotonically_with_budget() {
        let network = network(
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0)],
            &[
                (0, 1, 60.0),
                (0, 2, 90.0),
                (1, 3, 120.0),
                (2, 3, 45.0),
                (3, 4, 300.0),
            ],
        );

        let mut previous = 0;
        for budget in [0.0, 60.0, 135.0, 180.0, 435.0, 1000.0] {
            let area = generate_isochrone(&network, NodeIndex::new(0), budget)
                .unwrap()
                .unwrap();
            assert!(
                area.reached_nodes >= previous,
                "budget {budget}: reachable set shrank"
            );
            previous = area.reached_nodes;
        }
    }

    #[test]
    fn disconnected_node_is_never_reached() {
        // Node 2 is only connected by an arc pointing away from it
        let network = network(
            &[(0.0, 0.0), (1.0, 0.0), (50.0, 50.0)],
            &[(0, 1, 30.0), (2, 0, 10.0)],
        );

        let area = generate_isochrone(&network, NodeIndex::new(0), 1.0e12)
            .unwrap()
            .unwrap();

        assert_eq!(area.reached_nodes, 2);
        assert!(!hull_coords(&area).contains(&(50, 50)));
    }

    #[test]
    fn negative_budget_is_rejected() {
        let network = collinear_chain();

        let result = generate_isochrone(&network, NodeIndex::new(0), -5.0);

        assert!(matches!(result, Err(Error::InvalidTimeBudget(b)) if b == -5.0));
    }

    #[test]
    fn nan_budget_is_rejected() {
        let network = collinear_chain();

        assert!(matches!(
            generate_isochrone(&network, NodeIndex::new(0), f64::NAN),
            Err(Error::InvalidTimeBudget(_))
        ));
    }

    #[test]
    fn missing_source_node_is_rejected() {
        let network = collinear_chain();

        let result = generate_isochrone(&network, NodeIndex::new(99), 300.0);

        assert!(matches!(result, Err(Error::NodeNotFound(99))));
    }

    #[test]
    fn triangle_produces_a_proper_hull() {
        let network = network(
            &[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0), (10.0, 10.0)],
            &[(0, 1, 10.0), (0, 2, 10.0), (0, 3, 500.0)],
        );

        let area = generate_isochrone(&network, NodeIndex::new(0), 60.0)
            .unwrap()
            .unwrap();

        assert_eq!(area.reached_nodes, 3);
        assert_eq!(area.polygon.unsigned_area(), 2.0);
    }

    #[test]
    fn bulk_results_match_single_queries_in_order() {
        let network = collinear_chain();
        let sources = [NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(2)];

        let bulk = bulk_isochrones(&network, &sources, 100.0).unwrap();

        assert_eq!(bulk.len(), 3);
        for (source, area) in sources.iter().zip(&bulk) {
            let single = generate_isochrone(&network, *source, 100.0).unwrap();
            assert_eq!(
                area.as_ref().map(|a| a.reached_nodes),
                single.map(|a| a.reached_nodes)
            );
        }
        // C is a sink: only itself is reachable
        assert_eq!(bulk[2].as_ref().unwrap().reached_nodes, 1);
    }

    #[test]
    fn bulk_propagates_the_first_error() {
        let network = collinear_chain();
        let sources = [NodeIndex::new(0), NodeIndex::new(99)];

        assert!(matches!(
            bulk_isochrones(&network, &sources, 100.0),
            Err(Error::NodeNotFound(99))
        ));
    }
}
