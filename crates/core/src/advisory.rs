//! The result of one refresh cycle.

use std::sync::Arc;

use signal_advisor_signals::{Coordinate, PhaseReading, TrafficSignal};

use crate::presentation::RenderRequest;

/// Everything the presentation collaborators need for one refresh.
#[derive(Clone, Debug)]
pub struct Advisory {
    /// Index of the vehicle's waypoint on the route.
    pub position: usize,
    pub coordinate: Coordinate,
    pub signal: Arc<TrafficSignal>,
    pub distance_m: f64,
    pub eta_s: f64,
    /// Session time the phase was predicted for.
    pub elapsed_s: f64,
    pub reading: PhaseReading,
}

impl Advisory {
    /// Utterance for the voice collaborator.
    pub fn announcement(&self) -> String {
        format!(
            "Upcoming traffic light: {}. Signal is {}. {} seconds remaining.",
            self.signal.name(),
            self.reading.phase.label(),
            self.reading.remaining_whole_seconds(),
        )
    }

    pub fn render_request(&self) -> RenderRequest {
        RenderRequest {
            coordinate: self.coordinate,
            signal_name: self.signal.name().to_string(),
            distance_m: round_tenths(self.distance_m),
            eta_s: round_tenths(self.eta_s),
            phase: self.reading.phase,
            remaining_s: self.reading.remaining_whole_seconds(),
        }
    }
}

/// One decimal place, halves to even.
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
