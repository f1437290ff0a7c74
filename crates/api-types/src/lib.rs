//! Wire types shared by the HTTP adapter and the browser page.
//!
//! Coordinates travel as `[latitude, longitude]` pairs, the order map
//! widgets expect.

use serde::{Deserialize, Serialize};

pub type LatLon = [f64; 2];

pub type SessionId = u64;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct CreateSession {
    #[serde(default)]
    pub speed_kmh: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SessionCreated {
    pub id: SessionId,
    pub speed_kmh: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Advanced {
    pub position: usize,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SpeedConfig {
    pub min_kmh: f64,
    pub max_kmh: f64,
    pub default_kmh: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AdvisoryResponse {
    pub position: usize,
    pub display: DisplayFields,
    pub announcement: String,
    pub map: MapPayload,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DisplayFields {
    pub location: LatLon,
    pub signal: String,
    pub distance_m: f64,
    pub eta_s: f64,
    /// `RED` or `GREEN`
    pub phase: String,
    /// Phase with its lamp, e.g. `🔴 RED`
    pub indicator: String,
    pub remaining_s: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MapPayload {
    pub center: LatLon,
    pub zoom: u8,
    pub markers: Vec<MarkerPayload>,
    /// `[south_west, north_east]`
    pub bounds: Option<[LatLon; 2]>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MarkerPayload {
    pub location: LatLon,
    pub label: String,
    /// `vehicle` or `signal`
    pub kind: String,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
