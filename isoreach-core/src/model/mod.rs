//! Road network data model
//!
//! Contains the graph representation of the drivable street network
//! used by the routing and isochrone layers.

pub mod components;
pub mod network;

pub use components::{RoadNode, RoadSegment};
pub use network::{IndexedPoint, RoadNetwork};
