//! This module is responsible for loading road geometry and source
//! locations from GeoJSON and building the routable network.

mod config;
mod points;
mod roads;

pub use config::NetworkConfig;
pub use points::{NamedPoint, load_points, points_from_geojson};
pub use roads::{load_road_network, road_network_from_geojson};
