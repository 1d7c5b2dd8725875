// The "No" button that dodges the pointer. Pushed away while the pointer is
// close, clamped inside its card, and springs home after a quiet period.

use serde::{Deserialize, Serialize};

use crate::config::EvasiveSettings;
use crate::timer::OneShot;
use crate::types::{Offset, Point, Rect, Timestamp};

/// One pointer-move sample with the geometry it was taken against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub pointer: Point,
    /// The control's on-screen box, current offset included.
    pub control: Rect,
    /// The card the control must stay inside.
    pub container: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum EvasiveState {
    Resting,
    Displaced { offset: Offset },
}

/// Compute the new offset for a sample, or `None` if the pointer is far away.
pub fn repulsion(sample: &PointerSample, current: Offset, settings: &EvasiveSettings) -> Option<Offset> {
    let center = sample.control.center();
    let distance = sample.pointer.distance_to(center);
    let threshold = settings.threshold_px;
    if !distance.is_finite() || distance >= threshold {
        return None;
    }

    // Unit vector from the pointer towards the control's center.
    let (ux, uy) = if distance > 0.0 {
        (
            (center.x - sample.pointer.x) / distance,
            (center.y - sample.pointer.y) / distance,
        )
    } else if current.length() > 0.0 {
        (current.x / current.length(), current.y / current.length())
    } else {
        (1.0, 0.0)
    };

    let force = (threshold - distance) / threshold;
    let push = force * threshold * settings.push_factor;

    let max_x = (sample.container.width / 2.0 - settings.edge_margin_px).max(0.0);
    let max_y = (sample.container.height / 2.0 - settings.edge_margin_px).max(0.0);

    Some(Offset::new(
        (current.x + ux * push).clamp(-max_x, max_x),
        (current.y + uy * push).clamp(-max_y, max_y),
    ))
}

/// Resting/Displaced state machine with a single owned reset timer.
#[derive(Debug, Clone)]
pub struct EvasiveControl {
    settings: EvasiveSettings,
    state: EvasiveState,
    reset: OneShot,
    disposed: bool,
}

impl EvasiveControl {
    pub fn new(settings: EvasiveSettings) -> Self {
        EvasiveControl {
            settings,
            state: EvasiveState::Resting,
            reset: OneShot::idle(),
            disposed: false,
        }
    }

    pub fn state(&self) -> EvasiveState {
        self.state
    }

    pub fn offset(&self) -> Offset {
        match self.state {
            EvasiveState::Resting => Offset::ZERO,
            EvasiveState::Displaced { offset } => offset,
        }
    }

    pub fn reset_deadline(&self) -> Option<Timestamp> {
        self.reset.deadline()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Feed a pointer sample. Returns the new offset if the control moved.
    pub fn on_pointer(&mut self, now: Timestamp, sample: &PointerSample) -> Option<Offset> {
        if self.disposed {
            return None;
        }
        let offset = repulsion(sample, self.offset(), &self.settings)?;
        self.state = EvasiveState::Displaced { offset };
        self.reset.arm(now, self.settings.reset_after_ms);
        tracing::trace!(x = offset.x, y = offset.y, "evasive control displaced");
        Some(offset)
    }

    /// Returns `true` when the quiet period elapsed and the control went home.
    pub fn tick(&mut self, now: Timestamp) -> bool {
        if !self.reset.poll(now) {
            return false;
        }
        self.state = EvasiveState::Resting;
        tracing::debug!("evasive control reset");
        true
    }

    /// Release the timer. Later samples and ticks do nothing.
    pub fn dispose(&mut self) {
        self.reset.cancel();
        self.state = EvasiveState::Resting;
        self.disposed = true;
    }
}
