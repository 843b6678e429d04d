//! Road-network isochrone (service area) computation.
//!
//! Builds a directed travel-time graph from road geometry, runs
//! single-source shortest-path queries over it, and turns the set of
//! nodes reachable within a time budget into a convex-hull polygon.

pub mod algo;
pub mod error;
pub mod export;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

/// Travel time in seconds.
pub type Seconds = f64;
