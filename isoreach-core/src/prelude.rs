// Re-export of the surface most callers need
pub use crate::algo::isochrone::{ServiceArea, bulk_isochrones, generate_isochrone};
pub use crate::error::Error;
pub use crate::export::{service_area_to_feature, service_areas_to_geojson, to_geojson_string};
pub use crate::loading::{
    NamedPoint, NetworkConfig, load_points, load_road_network, points_from_geojson,
    road_network_from_geojson,
};
pub use crate::model::{RoadNetwork, RoadNode, RoadSegment};
pub use crate::routing::travel_times_from;

pub use crate::Seconds;
