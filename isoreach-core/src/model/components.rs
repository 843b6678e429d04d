//! Road network components - junction nodes and drivable segments

use geo::{LineString, Point};

use crate::Seconds;

/// Road graph node (junction or segment endpoint)
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Node coordinates (lon/lat, WGS84)
    pub geometry: Point<f64>,
}

/// Road graph edge (drivable segment)
#[derive(Debug, Clone)]
pub struct RoadSegment {
    /// Driving time in seconds
    pub travel_time: Seconds,
    /// Segment geometry for export and visualization
    pub geometry: LineString<f64>,
}
