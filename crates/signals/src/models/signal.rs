//! Traffic signals.

use crate::models::cycle::SignalCycle;
use crate::models::types::{Coordinate, PhaseReading};

/// A fixed-time traffic signal at a known location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TrafficSignal {
    /// Unique within a signal set.
    name: String,
    location: Coordinate,
    cycle: SignalCycle,

    /// Seconds after simulation start at which the reference red phase began.
    #[cfg_attr(feature = "serde", serde(default, alias = "start_time"))]
    phase_offset: f64,
}

impl TrafficSignal {
    pub fn new(
        name: impl Into<String>,
        location: Coordinate,
        cycle: SignalCycle,
        phase_offset: f64,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            cycle,
            phase_offset,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub fn cycle(&self) -> &SignalCycle {
        &self.cycle
    }

    pub fn phase_offset(&self) -> f64 {
        self.phase_offset
    }

    /// Predicted phase `elapsed` seconds after simulation start.
    pub fn phase_at(&self, elapsed: f64) -> PhaseReading {
        self.cycle.phase_at(elapsed, self.phase_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::Phase;
    use approx::assert_relative_eq;

    fn sector_22_23() -> TrafficSignal {
        TrafficSignal::new(
            "Sector 22/23 Intersection",
            Coordinate::new(30.7360, 76.7750).unwrap(),
            SignalCycle::new(40.0, 20.0).unwrap(),
            15.0,
        )
    }

    #[test]
    fn test_phase_uses_offset() {
        let signal = sector_22_23();

        let at_offset = signal.phase_at(15.0);
        assert_eq!(at_offset.phase, Phase::Red);
        assert_relative_eq!(at_offset.remaining, 20.0);

        // At simulation start the signal is 15s from the end of its green phase.
        let at_start = signal.phase_at(0.0);
        assert_eq!(at_start.phase, Phase::Green);
        assert_relative_eq!(at_start.remaining, 15.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_signal() {
        let json = r#"{
            "name": "Sector 22/23 Intersection",
            "location": [30.7360, 76.7750],
            "cycle": { "green": 40, "red": 20 },
            "start_time": 15
        }"#;

        let signal: TrafficSignal = serde_json::from_str(json).unwrap();
        assert_eq!(signal, sector_22_23());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_bad_cycle() {
        let json = r#"{
            "name": "Broken",
            "location": [30.7360, 76.7750],
            "cycle": { "green": 0, "red": 20 }
        }"#;

        assert!(serde_json::from_str::<TrafficSignal>(json).is_err());
    }
}
