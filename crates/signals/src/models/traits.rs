//! Provider interface for signal data.
//!
//! Implementations can be in-memory or backed by a city's signal inventory.

use std::sync::Arc;

use crate::models::signal::TrafficSignal;
use crate::models::types::Coordinate;
use crate::spatial::queries::NearestSignal;

/// Provider of the configured signal set
pub trait SignalProvider: Send + Sync {
    /// All signals, in configuration order
    fn all_signals(&self) -> &[Arc<TrafficSignal>];

    /// Closest signal to `from`; the earliest configured signal wins exact ties.
    /// `None` only for an empty provider.
    fn nearest_signal(&self, from: Coordinate) -> Option<NearestSignal>;
}
