pub mod dijkstra;

pub use dijkstra::travel_times_from;
