//! Per-user simulation state.
//!
//! A session owns the vehicle's position on the route and the instant it
//! was created. Position only changes through [`Session::advance`], which
//! wraps back to the first waypoint after the last one; the start instant
//! never changes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use signal_advisor_signals::{Coordinate, SignalError, SignalProvider};
use tracing::{debug, info, warn};

use crate::advisory::Advisory;
use crate::clock::{Clock, seconds_between};
use crate::config::{Scenario, Speed};
use crate::error::{AdvisorError, Result};

pub struct Session {
    scenario: Arc<Scenario>,
    clock: Arc<dyn Clock>,
    speed: Speed,
    position: usize,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Start a session at the first waypoint. `speed_kmh` falls back to the
    /// scenario default and must lie within its speed limits.
    pub fn new(scenario: Arc<Scenario>, clock: Arc<dyn Clock>, speed_kmh: Option<f64>) -> Result<Self> {
        let limits = scenario.speed_limits();
        let speed = match speed_kmh {
            Some(kmh) => limits.check(kmh)?,
            None => limits.default_speed(),
        };
        let started_at = clock.now();

        info!(speed_kmh = speed.kmh(), %started_at, "session started");

        Ok(Self {
            scenario,
            clock,
            speed,
            position: 0,
            started_at,
        })
    }

    /// Step to the next waypoint, wrapping to the first. Returns the new index.
    pub fn advance(&mut self) -> usize {
        let next = self.position + 1;
        self.position = if next < self.scenario.route().len() { next } else { 0 };

        debug!(position = self.position, "advanced");
        self.position
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current_coordinate(&self) -> Coordinate {
        // position < route length is kept by `advance`, and routes are never empty
        self.scenario.route().waypoints()[self.position]
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Seconds since the session started. Negative if the clock was set back.
    pub fn elapsed_seconds(&self) -> f64 {
        seconds_between(self.started_at, self.clock.now())
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn scenario(&self) -> &Arc<Scenario> {
        &self.scenario
    }

    /// One refresh cycle: nearest signal, ETA at the session speed, and the
    /// signal's phase now.
    pub fn refresh(&self) -> Result<Advisory> {
        let coordinate = self.current_coordinate();
        let nearest = self
            .scenario
            .signals()
            .nearest_signal(coordinate)
            .ok_or(AdvisorError::Signal(SignalError::NoSignals))?;

        let elapsed_s = self.elapsed_seconds();
        if elapsed_s < 0.0 {
            warn!(elapsed_s, "clock is behind session start");
        }

        let advisory = Advisory {
            position: self.position,
            coordinate,
            eta_s: nearest.distance_m / self.speed.meters_per_second(),
            distance_m: nearest.distance_m,
            reading: nearest.signal.phase_at(elapsed_s),
            signal: nearest.signal,
            elapsed_s,
        };

        debug!(
            position = advisory.position,
            signal = advisory.signal.name(),
            distance_m = advisory.distance_m,
            phase = %advisory.reading.phase,
            "refreshed"
        );

        Ok(advisory)
    }
}
