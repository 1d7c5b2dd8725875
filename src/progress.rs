// Simulated loading progress: fixed increments on a fixed tick until 100%,
// then a short pause before completion is signalled.

use serde::Serialize;

use crate::config::LoadingSettings;
use crate::timer::{Interval, OneShot};
use crate::types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressPhase {
    /// Ticking towards 100%.
    Running,
    /// Holding at 100% for the completion pause.
    Finishing,
    /// Completion has been signalled.
    Complete,
}

#[derive(Debug, Clone)]
pub struct ProgressSimulation {
    steps: u64,
    ticks: u64,
    completion_pause_ms: u64,
    ticker: Interval,
    completion: OneShot,
    phase: ProgressPhase,
}

impl ProgressSimulation {
    pub fn start(now: Timestamp, settings: &LoadingSettings) -> Self {
        ProgressSimulation {
            steps: settings.steps(),
            ticks: 0,
            completion_pause_ms: settings.completion_pause_ms,
            ticker: Interval::start(now, settings.tick_ms),
            completion: OneShot::idle(),
            phase: ProgressPhase::Running,
        }
    }

    /// Percent in `[0, 100]`; exactly `100.0` once the last tick has run.
    pub fn percent(&self) -> f64 {
        if self.ticks >= self.steps {
            100.0
        } else {
            self.ticks as f64 * 100.0 / self.steps as f64
        }
    }

    /// Rounded value for the "NN%" label.
    pub fn display_percent(&self) -> u8 {
        self.percent().round() as u8
    }

    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    /// Run every tick due by `now`. Returns `true` exactly once, when the
    /// completion pause elapses.
    pub fn advance(&mut self, now: Timestamp) -> bool {
        while self.phase == ProgressPhase::Running {
            let Some(due) = self.ticker.poll_one(now) else {
                break;
            };
            self.ticks += 1;
            if self.ticks >= self.steps {
                self.ticker.stop();
                self.completion.arm(due, self.completion_pause_ms);
                self.phase = ProgressPhase::Finishing;
                tracing::debug!(at_ms = due.as_millis(), "loading reached 100%");
            }
        }

        if self.phase == ProgressPhase::Finishing && self.completion.poll(now) {
            self.phase = ProgressPhase::Complete;
            return true;
        }
        false
    }
}
