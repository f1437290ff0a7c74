//! Signal data models, types, and traits.

pub mod cycle;
pub mod signal;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use cycle::SignalCycle;
pub use signal::TrafficSignal;
pub use traits::SignalProvider;
pub use types::{Coordinate, Phase, PhaseReading, Result, SignalError};
