// Top-level sequencer: Gate -> Loading -> Content. One-shot and linear; there
// is no cancel, pause or way back.

use serde::Serialize;

use crate::config::LoadingSettings;
use crate::progress::ProgressSimulation;
use crate::types::{Timestamp, ViewState};

/// A state change the rest of the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewTransition {
    ToLoading,
    ToContent,
}

#[derive(Debug, Clone)]
pub struct ViewStateController {
    state: ViewState,
    settings: LoadingSettings,
    progress: Option<ProgressSimulation>,
}

impl ViewStateController {
    pub fn new(settings: LoadingSettings) -> Self {
        ViewStateController {
            state: ViewState::Gate,
            settings,
            progress: None,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Present while loading, and kept at 100% afterwards.
    pub fn progress(&self) -> Option<&ProgressSimulation> {
        self.progress.as_ref()
    }

    /// The "enter" signal. Only honored at the gate.
    pub fn enter(&mut self, now: Timestamp) -> Option<ViewTransition> {
        if self.state != ViewState::Gate {
            tracing::debug!(state = %self.state, "enter ignored");
            return None;
        }
        self.state = ViewState::Loading;
        self.progress = Some(ProgressSimulation::start(now, &self.settings));
        tracing::info!("gate -> loading");
        Some(ViewTransition::ToLoading)
    }

    /// Advance the loading simulation to `now`.
    pub fn tick(&mut self, now: Timestamp) -> Option<ViewTransition> {
        if self.state != ViewState::Loading {
            return None;
        }
        let progress = self.progress.as_mut()?;
        if !progress.advance(now) {
            return None;
        }
        self.state = ViewState::Content;
        tracing::info!("loading -> content");
        Some(ViewTransition::ToContent)
    }
}
