//! Terminal walkthrough of a session.
//!
//! Runs against a manual clock so a whole route can be replayed instantly:
//! each step renders an advisory, then moves the clock forward by the step
//! interval and the vehicle forward by one waypoint.

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::{Context, Result, ensure};
use chrono::{TimeDelta, Utc};
use signal_advisor_core::presentation::{TextDisplay, VoiceAnnouncer, map_view, present};
use signal_advisor_core::{ManualClock, Scenario, Session};
use tracing::info;

/// Voice collaborator for terminals: utterances go to the log.
struct LoggedVoice;

impl VoiceAnnouncer for LoggedVoice {
    fn announce(&mut self, utterance: &str) -> signal_advisor_core::Result<()> {
        info!(target: "voice", "{utterance}");
        Ok(())
    }
}

pub struct Walkthrough {
    pub speed_kmh: Option<f64>,
    pub steps: usize,
    pub interval_s: f64,
}

impl Walkthrough {
    pub fn run(&self, scenario: Arc<Scenario>) -> Result<()> {
        ensure!(
            self.interval_s.is_finite() && self.interval_s >= 0.0,
            "interval must be a non-negative number of seconds, got {}",
            self.interval_s
        );
        let interval = TimeDelta::try_milliseconds((self.interval_s * 1000.0).round() as i64)
            .with_context(|| format!("interval of {}s is too long", self.interval_s))?;

        let clock = ManualClock::new(Utc::now());
        let mut session = Session::new(scenario, Arc::new(clock.clone()), self.speed_kmh)
            .context("failed to start session")?;

        let mut display: TextDisplay<Stdout> = TextDisplay::new(io::stdout());
        let mut map: TextDisplay<Stdout> = TextDisplay::new(io::stdout());
        let mut voice = LoggedVoice;

        for step in 0..self.steps {
            let advisory = session.refresh().context("refresh failed")?;
            let view = map_view(&session, &advisory);

            println!("--- step {step} (t = {:.0}s) ---", advisory.elapsed_s);
            present(&advisory, &view, &mut display, &mut map, &mut voice)
                .context("failed to write advisory")?;
            println!();

            clock
                .advance_by(interval)
                .with_context(|| format!("simulated clock overflowed after step {step}"))?;
            session.advance();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_advisor_core::AdvisorConfig;

    fn chandigarh() -> Arc<Scenario> {
        Arc::new(AdvisorConfig::chandigarh().unwrap().into_scenario().unwrap())
    }

    #[test]
    fn test_walkthrough_wraps_route() {
        let walkthrough = Walkthrough {
            speed_kmh: Some(40.0),
            steps: 7,
            interval_s: 2.5,
        };

        assert!(walkthrough.run(chandigarh()).is_ok());
    }

    #[test]
    fn test_walkthrough_rejects_bad_input() {
        let negative = Walkthrough {
            speed_kmh: None,
            steps: 1,
            interval_s: -1.0,
        };
        assert!(negative.run(chandigarh()).is_err());

        let too_fast = Walkthrough {
            speed_kmh: Some(120.0),
            steps: 1,
            interval_s: 1.0,
        };
        assert!(too_fast.run(chandigarh()).is_err());
    }

    #[test]
    fn test_walkthrough_huge_interval_is_an_error() {
        let huge = Walkthrough {
            speed_kmh: None,
            steps: 2,
            interval_s: 1e15,
        };
        let error = huge.run(chandigarh()).unwrap_err();
        assert!(error.to_string().contains("overflowed"));

        // Saturates to the largest TimeDelta, which still overflows
        let endless = Walkthrough {
            speed_kmh: None,
            steps: 2,
            interval_s: 1e300,
        };
        assert!(endless.run(chandigarh()).is_err());
    }
}
