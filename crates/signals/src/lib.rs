//! # signal-advisor-signals
//!
//! Traffic signal data, great-circle distance and phase prediction.
//!
//! ## Features
//!
//! - **Haversine distance**: surface distance between coordinates in meters
//! - **Phase prediction**: red/green phase and countdown from a signal's cycle
//! - **Nearest signal**: first-wins linear resolver over the configured signal set
//!
//! ## Example
//!
//! ```
//! use signal_advisor_signals::prelude::*;
//!
//! let signal = TrafficSignal::new(
//!     "Sector 17/22 Intersection",
//!     Coordinate::new(30.7390, 76.7780).unwrap(),
//!     SignalCycle::new(30.0, 30.0).unwrap(),
//!     0.0,
//! );
//!
//! let provider = StaticSignalProvider::new(vec![signal]).unwrap();
//!
//! let car = Coordinate::new(30.7412, 76.7824).unwrap();
//! let nearest = provider.nearest_signal(car).unwrap();
//! assert_eq!(nearest.signal.name(), "Sector 17/22 Intersection");
//! assert!(nearest.distance_m > 400.0 && nearest.distance_m < 600.0);
//!
//! let reading = nearest.signal.phase_at(31.0);
//! assert_eq!(reading.phase, Phase::Green);
//! ```

pub mod models;
pub mod provider;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::models::{traits::*, types::*, cycle::SignalCycle, signal::TrafficSignal};
    pub use crate::provider::static_provider::StaticSignalProvider;
    pub use crate::spatial::queries::{haversine_distance, nearest_signal, NearestSignal};
}

pub use prelude::*;
