//! Session configuration.
//!
//! An [`AdvisorConfig`] is the raw, deserialisable form. It is validated
//! once, at startup, into a [`Scenario`] that sessions share read-only.

use std::path::Path;

use serde::{Deserialize, Serialize};
use signal_advisor_signals::{Coordinate, StaticSignalProvider, TrafficSignal};

use crate::error::{AdvisorError, Result};

const CHANDIGARH: &str = include_str!("../assets/chandigarh.json");

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub speed: SpeedLimits,
    pub route: Vec<Coordinate>,
    pub signals: Vec<TrafficSignal>,
}

impl AdvisorConfig {
    /// Built-in scenario: Sector 17 down to the Sector 22/23 junction.
    pub fn chandigarh() -> Result<Self> {
        Self::from_json(CHANDIGARH)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every precondition and freeze the configuration.
    pub fn into_scenario(self) -> Result<Scenario> {
        self.speed.validate()?;

        Ok(Scenario {
            speed: self.speed,
            route: Route::new(self.route)?,
            signals: StaticSignalProvider::new(self.signals)?,
        })
    }
}

// ============================================================================
// Speed
// ============================================================================

/// Inclusive bounds on the vehicle speed a session may use, in km/h.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct SpeedLimits {
    pub min_kmh: f64,
    pub max_kmh: f64,
    pub default_kmh: f64,
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self {
            min_kmh: 10.0,
            max_kmh: 60.0,
            default_kmh: 30.0,
        }
    }
}

impl SpeedLimits {
    fn validate(&self) -> Result<()> {
        if !(self.min_kmh > 0.0 && self.min_kmh <= self.max_kmh && self.max_kmh.is_finite()) {
            return Err(AdvisorError::InvalidSpeedLimits {
                min_kmh: self.min_kmh,
                max_kmh: self.max_kmh,
            });
        }

        self.check(self.default_kmh).map(|_| ())
    }

    pub fn check(&self, kmh: f64) -> Result<Speed> {
        if !(self.min_kmh..=self.max_kmh).contains(&kmh) {
            return Err(AdvisorError::SpeedOutOfRange {
                kmh,
                min_kmh: self.min_kmh,
                max_kmh: self.max_kmh,
            });
        }

        Ok(Speed { kmh })
    }

    pub fn default_speed(&self) -> Speed {
        Speed {
            kmh: self.default_kmh,
        }
    }
}

/// A vehicle speed that has passed [`SpeedLimits::check`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Speed {
    kmh: f64,
}

impl Speed {
    pub fn kmh(&self) -> f64 {
        self.kmh
    }

    pub fn meters_per_second(&self) -> f64 {
        self.kmh * 1000.0 / 3600.0
    }
}

// ============================================================================
// Scenario
// ============================================================================

/// Ordered waypoints the vehicle steps through. Never empty.
#[derive(Clone, Debug)]
pub struct Route(Vec<Coordinate>);

impl Route {
    pub fn new(waypoints: Vec<Coordinate>) -> Result<Self> {
        if waypoints.is_empty() {
            return Err(AdvisorError::EmptyRoute);
        }

        Ok(Self(waypoints))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn waypoints(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<Coordinate> {
        self.0.get(index).copied()
    }
}

/// A validated configuration.
#[derive(Clone)]
pub struct Scenario {
    speed: SpeedLimits,
    route: Route,
    signals: StaticSignalProvider,
}

impl Scenario {
    pub fn speed_limits(&self) -> &SpeedLimits {
        &self.speed
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn signals(&self) -> &StaticSignalProvider {
        &self.signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_advisor_signals::{SignalError, SignalProvider};

    #[test]
    fn test_chandigarh_scenario() {
        let scenario = AdvisorConfig::chandigarh().unwrap().into_scenario().unwrap();

        assert_eq!(scenario.route().len(), 5);
        assert_eq!(scenario.route().get(0), Some(Coordinate::new(30.7412, 76.7824).unwrap()));
        assert_eq!(scenario.route().get(4), Some(Coordinate::new(30.7360, 76.7750).unwrap()));
        assert_eq!(scenario.route().get(5), None);

        let names: Vec<_> = scenario.signals().all_signals().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["Sector 17/22 Intersection", "Sector 22/23 Intersection"]);
        assert_eq!(scenario.signals().all_signals()[1].phase_offset(), 15.0);

        assert_eq!(*scenario.speed_limits(), SpeedLimits::default());
    }

    #[test]
    fn test_speed_conversion() {
        let speed = SpeedLimits::default().check(30.0).unwrap();
        assert!((speed.meters_per_second() - 8.333_333).abs() < 1e-6);
        assert_eq!(SpeedLimits::default().default_speed(), speed);
    }

    #[test]
    fn test_speed_limits_inclusive() {
        let limits = SpeedLimits::default();

        assert!(limits.check(10.0).is_ok());
        assert!(limits.check(60.0).is_ok());
        assert!(matches!(limits.check(9.9), Err(AdvisorError::SpeedOutOfRange { .. })));
        assert!(limits.check(61.0).is_err());
        assert!(limits.check(f64::NAN).is_err());
    }

    fn config(json: &str) -> Result<Scenario> {
        AdvisorConfig::from_json(json)?.into_scenario()
    }

    #[test]
    fn test_speed_defaults_when_omitted() {
        let scenario = config(
            r#"{
                "route": [[30.7412, 76.7824]],
                "signals": [{ "name": "A", "location": [30.7390, 76.7780], "cycle": { "green": 30, "red": 30 } }]
            }"#,
        )
        .unwrap();

        assert_eq!(*scenario.speed_limits(), SpeedLimits::default());
        assert_eq!(scenario.signals().all_signals()[0].phase_offset(), 0.0);
    }

    #[test]
    fn test_empty_route_rejected() {
        let result = config(
            r#"{
                "route": [],
                "signals": [{ "name": "A", "location": [30.7390, 76.7780], "cycle": { "green": 30, "red": 30 } }]
            }"#,
        );

        assert!(matches!(result, Err(AdvisorError::EmptyRoute)));
    }

    #[test]
    fn test_empty_signals_rejected() {
        let result = config(r#"{ "route": [[30.7412, 76.7824]], "signals": [] }"#);

        assert!(matches!(result, Err(AdvisorError::Signal(SignalError::NoSignals))));
    }

    #[test]
    fn test_bad_values_rejected() {
        // Latitude out of range
        assert!(matches!(
            config(r#"{ "route": [[91.0, 76.7824]], "signals": [] }"#),
            Err(AdvisorError::Config(_))
        ));

        // Zero-length red phase
        assert!(matches!(
            config(
                r#"{
                    "route": [[30.7412, 76.7824]],
                    "signals": [{ "name": "A", "location": [30.7390, 76.7780], "cycle": { "green": 30, "red": 0 } }]
                }"#
            ),
            Err(AdvisorError::Config(_))
        ));
    }

    #[test]
    fn test_bad_speed_limits_rejected() {
        let signals = r#"[{ "name": "A", "location": [30.7390, 76.7780], "cycle": { "green": 30, "red": 30 } }]"#;

        let inverted = format!(
            r#"{{ "speed": {{ "min_kmh": 60, "max_kmh": 10, "default_kmh": 30 }}, "route": [[30.7412, 76.7824]], "signals": {signals} }}"#
        );
        assert!(matches!(config(&inverted), Err(AdvisorError::InvalidSpeedLimits { .. })));

        let default_outside = format!(
            r#"{{ "speed": {{ "min_kmh": 10, "max_kmh": 60, "default_kmh": 80 }}, "route": [[30.7412, 76.7824]], "signals": {signals} }}"#
        );
        assert!(matches!(config(&default_outside), Err(AdvisorError::SpeedOutOfRange { .. })));
    }
}
