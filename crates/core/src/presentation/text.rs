//! Plain-text rendering for terminals and logs.

use std::io::Write;

use crate::error::Result;
use crate::presentation::{DisplaySurface, MapOverlay, MapView, RenderRequest};

pub struct TextDisplay<W> {
    out: W,
}

impl<W: Write> TextDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySurface for TextDisplay<W> {
    fn render(&mut self, request: &RenderRequest) -> Result<()> {
        writeln!(self.out, "📍 Current Location: {}", request.coordinate)?;
        writeln!(self.out, "🚦 Next Signal: {}", request.signal_name)?;
        writeln!(self.out, "🧭 Distance: {:.1} meters", request.distance_m)?;
        writeln!(self.out, "⏱ ETA: {:.1} seconds", request.eta_s)?;
        writeln!(
            self.out,
            "💡 Signal Phase: {} ({}s left)",
            request.phase.indicator(),
            request.remaining_s
        )?;
        Ok(())
    }
}

impl<W: Write> MapOverlay for TextDisplay<W> {
    fn plot(&mut self, view: &MapView) -> Result<()> {
        for marker in &view.markers {
            writeln!(self.out, "   [{}] {} at {}", marker.kind, marker.label, marker.coordinate)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
