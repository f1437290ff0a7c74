//! Core of the signal advisor: sessions that walk a vehicle along a fixed
//! route and predict the phase of the nearest traffic signal on arrival.

pub mod advisory;
pub mod clock;
pub mod config;
pub mod error;
pub mod presentation;
pub mod session;

// Re-export signal data from the signals crate
pub use signal_advisor_signals as signals;

pub use advisory::Advisory;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AdvisorConfig, Route, Scenario, Speed, SpeedLimits};
pub use error::{AdvisorError, Result};
pub use session::Session;
