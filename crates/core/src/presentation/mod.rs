//! Interfaces to the collaborators that show an advisory to the driver.
//!
//! The core never renders anything itself: it hands a [`RenderRequest`] to a
//! [`DisplaySurface`], a [`MapView`] to a [`MapOverlay`], and an utterance to
//! a [`VoiceAnnouncer`].

use signal_advisor_signals::{Coordinate, Phase};
use tracing::warn;

use crate::advisory::Advisory;
use crate::error::Result;

pub mod map;
pub mod text;

pub use map::{MapView, Marker, MarkerKind, map_view};
pub use text::TextDisplay;

/// Display fields for one refresh.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest {
    pub coordinate: Coordinate,
    pub signal_name: String,
    /// Rounded to one decimal.
    pub distance_m: f64,
    /// Rounded to one decimal.
    pub eta_s: f64,
    pub phase: Phase,
    pub remaining_s: u32,
}

pub trait DisplaySurface {
    fn render(&mut self, request: &RenderRequest) -> Result<()>;
}

pub trait MapOverlay {
    fn plot(&mut self, view: &MapView) -> Result<()>;
}

/// One-way speech output. Failures are the announcer's problem; they are
/// logged and never reach the session.
pub trait VoiceAnnouncer {
    fn announce(&mut self, utterance: &str) -> Result<()>;
}

/// Hand one advisory to all three collaborators.
pub fn present(
    advisory: &Advisory,
    view: &MapView,
    display: &mut dyn DisplaySurface,
    map: &mut dyn MapOverlay,
    voice: &mut dyn VoiceAnnouncer,
) -> Result<()> {
    display.render(&advisory.render_request())?;

    if let Err(error) = voice.announce(&advisory.announcement()) {
        warn!(%error, "voice announcement failed");
    }

    map.plot(view)
}
