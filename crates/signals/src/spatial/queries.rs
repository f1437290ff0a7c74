//! Spatial query utilities for distance calculations.
//!
//! Uses the Haversine formula on a sphere of radius [`EARTH_RADIUS_M`].

use std::sync::Arc;

use crate::models::signal::TrafficSignal;
use crate::models::types::Coordinate;

/// Earth radius used for every distance in the crate, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate Haversine distance between two coordinates in meters
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let dlat = lat2 - lat1;
    let dlon = b.lon().to_radians() - a.lon().to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// The signal closest to a coordinate and how far away it is.
#[derive(Clone, Debug)]
pub struct NearestSignal {
    pub signal: Arc<TrafficSignal>,
    pub distance_m: f64,
}

/// Linear scan for the closest signal.
///
/// Comparison is strict, so on an exact tie the signal that comes first in
/// `signals` wins. Returns `None` if `signals` is empty.
pub fn nearest_signal(from: Coordinate, signals: &[Arc<TrafficSignal>]) -> Option<NearestSignal> {
    let mut best: Option<NearestSignal> = None;

    for signal in signals {
        let distance_m = haversine_distance(from, signal.location());
        let closer = match &best {
            Some(current) => distance_m < current.distance_m,
            None => true,
        };

        if closer {
            best = Some(NearestSignal {
                signal: signal.clone(),
                distance_m,
            });
        }
    }

    best
}
