pub mod isochrone;

pub use isochrone::{ServiceArea, bulk_isochrones, generate_isochrone};
