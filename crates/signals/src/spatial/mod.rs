//! Spatial query utilities.

pub mod queries;

pub use queries::{haversine_distance, nearest_signal, NearestSignal};
