use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("node {0} is not part of the road network")]
    NodeNotFound(usize),
    #[error("invalid time budget: {0} (must be a finite, non-negative number of seconds)")]
    InvalidTimeBudget(f64),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
