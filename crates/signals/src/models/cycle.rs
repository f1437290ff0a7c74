//! Fixed-time signal cycles.
//!
//! A cycle starts in red at the signal's phase offset, turns green once the
//! red duration has passed, and repeats every `red + green` seconds.

use crate::models::types::{Phase, PhaseReading, Result, SignalError};

/// Green and red durations of a signal, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCycle", into = "RawCycle"))]
pub struct SignalCycle {
    green: f64,
    red: f64,
}

impl SignalCycle {
    pub fn new(green: f64, red: f64) -> Result<Self> {
        // Also rejects NaN, which fails every comparison.
        if !(green > 0.0 && green.is_finite() && red > 0.0 && red.is_finite()) {
            return Err(SignalError::InvalidCycle { green, red });
        }

        Ok(Self { green, red })
    }

    pub fn green(&self) -> f64 {
        self.green
    }

    pub fn red(&self) -> f64 {
        self.red
    }

    pub fn period(&self) -> f64 {
        self.green + self.red
    }

    /// Phase `elapsed` seconds after simulation start for a cycle whose red
    /// phase began at `offset`.
    ///
    /// `elapsed - offset` may be negative (offsets in the future, clock
    /// resets); it is wrapped with a euclidean remainder so the position in
    /// the cycle always lands in `[0, period)`.
    pub fn phase_at(&self, elapsed: f64, offset: f64) -> PhaseReading {
        let period = self.period();
        let mut into_cycle = (elapsed - offset).rem_euclid(period);

        // rem_euclid can round up to exactly `period` for tiny negative inputs.
        if into_cycle >= period {
            into_cycle = 0.0;
        }

        if into_cycle < self.red {
            PhaseReading {
                phase: Phase::Red,
                remaining: self.red - into_cycle,
            }
        } else {
            PhaseReading {
                phase: Phase::Green,
                remaining: period - into_cycle,
            }
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
struct RawCycle {
    green: f64,
    red: f64,
}

impl TryFrom<RawCycle> for SignalCycle {
    type Error = SignalError;

    fn try_from(raw: RawCycle) -> Result<Self> {
        Self::new(raw.green, raw.red)
    }
}

impl From<SignalCycle> for RawCycle {
    fn from(cycle: SignalCycle) -> Self {
        Self {
            green: cycle.green,
            red: cycle.red,
        }
    }
}
