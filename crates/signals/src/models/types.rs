//! Core data types and enums for signal data.

use std::fmt;

// ============================================================================
// Coordinates
// ============================================================================

/// A latitude/longitude pair in degrees.
///
/// Always within `[-90, 90]` x `[-180, 180]`; construction goes through
/// [`Coordinate::new`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(f64, f64)", into = "(f64, f64)"))]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !lon.is_finite() || !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(SignalError::InvalidCoordinate { lat, lon });
        }

        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = SignalError;

    fn try_from((lat, lon): (f64, f64)) -> Result<Self> {
        Self::new(lat, lon)
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(c: Coordinate) -> Self {
        (c.lat, c.lon)
    }
}

impl From<Coordinate> for geo::Point {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lon, c.lat)
    }
}

impl TryFrom<geo::Point> for Coordinate {
    type Error = SignalError;

    fn try_from(p: geo::Point) -> Result<Self> {
        Self::new(p.y(), p.x())
    }
}

// ============================================================================
// Phases
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Phase {
    Red,
    Green,
}

impl Phase {
    /// Plain label, as spoken.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Red => "RED",
            Phase::Green => "GREEN",
        }
    }

    /// Label with a colored lamp, as displayed.
    pub fn indicator(&self) -> &'static str {
        match self {
            Phase::Red => "🔴 RED",
            Phase::Green => "🟢 GREEN",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Phase of a signal at some instant and the seconds left before it changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseReading {
    pub phase: Phase,
    pub remaining: f64,
}

impl PhaseReading {
    /// Countdown rounded to whole seconds for display and speech, halves to even.
    pub fn remaining_whole_seconds(&self) -> u32 {
        self.remaining.round_ties_even().max(0.0) as u32
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("Invalid coordinate: ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("Invalid cycle: green {green}s, red {red}s (both must be positive)")]
    InvalidCycle { green: f64, red: f64 },

    #[error("Invalid phase offset: {0}")]
    InvalidOffset(f64),

    #[error("Duplicate signal: {0}")]
    DuplicateSignal(String),

    #[error("Signal set is empty")]
    NoSignals,
}

pub type Result<T> = std::result::Result<T, SignalError>;
