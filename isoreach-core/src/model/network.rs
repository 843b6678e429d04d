use geo::{Distance, Haversine, Point};
use petgraph::{
    Directed,
    graph::{Edges, Graph, NodeIndex},
};
use rstar::{RTree, primitives::GeomWithData};

use super::{RoadNode, RoadSegment};

/// Node coordinate indexed in the R-tree, tagged with its graph index
pub type IndexedPoint = GeomWithData<Point<f64>, NodeIndex>;

/// Directed, travel-time-weighted road network with an R-tree over
/// node coordinates for nearest-node snapping.
///
/// The network is immutable after construction; routing and isochrone
/// queries only take `&RoadNetwork` and may run concurrently.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    pub graph: Graph<RoadNode, RoadSegment>,
    rtree: RTree<IndexedPoint>,
}

impl RoadNetwork {
    pub fn new(graph: Graph<RoadNode, RoadSegment>) -> Self {
        let rtree = RTree::bulk_load(
            graph
                .node_indices()
                .map(|node| IndexedPoint::new(graph[node].geometry, node))
                .collect(),
        );

        Self { graph, rtree }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, node: NodeIndex) -> bool {
        self.graph.node_weight(node).is_some()
    }

    /// Coordinates of a node, if it exists
    pub fn node_point(&self, node: NodeIndex) -> Option<Point<f64>> {
        self.graph.node_weight(node).map(|n| n.geometry)
    }

    /// Outgoing segments of a node
    pub fn edges(&self, node: NodeIndex) -> Edges<'_, RoadSegment, Directed> {
        self.graph.edges(node)
    }

    /// Nearest network node to an arbitrary point, with the great-circle
    /// snapping distance in meters. `None` on an empty network.
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<(NodeIndex, f64)> {
        self.rtree
            .nearest_neighbor(point)
            .map(|indexed| (indexed.data, Haversine.distance(*point, *indexed.geom())))
    }
}
