//! In-memory signal provider.
//!
//! Stores the configured signal set in order.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{signal::TrafficSignal, traits::SignalProvider, types::*};
use crate::spatial::queries::{nearest_signal, NearestSignal};

/// In-memory signal provider
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone)]
pub struct StaticSignalProvider {
    // Configuration order is significant for nearest-signal ties
    signals: Vec<Arc<TrafficSignal>>,
}

impl StaticSignalProvider {
    /// Build a provider from a non-empty set of uniquely named signals.
    pub fn new(signals: Vec<TrafficSignal>) -> Result<Self> {
        if signals.is_empty() {
            return Err(SignalError::NoSignals);
        }

        let mut names = HashSet::with_capacity(signals.len());
        for signal in &signals {
            if !signal.phase_offset().is_finite() {
                return Err(SignalError::InvalidOffset(signal.phase_offset()));
            }
            if !names.insert(signal.name()) {
                return Err(SignalError::DuplicateSignal(signal.name().to_string()));
            }
        }

        Ok(Self {
            signals: signals.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl SignalProvider for StaticSignalProvider {
    fn all_signals(&self) -> &[Arc<TrafficSignal>] {
        &self.signals
    }

    fn nearest_signal(&self, from: Coordinate) -> Option<NearestSignal> {
        nearest_signal(from, &self.signals)
    }
}
