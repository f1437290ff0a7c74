use signal_advisor_signals::SignalError;

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error("Route has no waypoints")]
    EmptyRoute,

    #[error("Invalid speed limits: {min_kmh} to {max_kmh} km/h")]
    InvalidSpeedLimits { min_kmh: f64, max_kmh: f64 },

    #[error("Speed {kmh} km/h outside {min_kmh} to {max_kmh} km/h")]
    SpeedOutOfRange { kmh: f64, min_kmh: f64, max_kmh: f64 },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
