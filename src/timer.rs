// Host-clock driven timers. The shell owns the real setTimeout/setInterval;
// the engine only keeps deadlines and is polled with the current timestamp.

use crate::types::Timestamp;

/// A cancellable one-shot deadline owned by exactly one component.
///
/// Arming an already pending timer replaces the old deadline, so there is
/// never more than one outstanding reset per owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OneShot {
    deadline: Option<Timestamp>,
}

impl OneShot {
    pub fn idle() -> Self {
        OneShot { deadline: None }
    }

    /// Cancel any pending deadline and schedule a new one `delay_ms` from `now`.
    pub fn arm(&mut self, now: Timestamp, delay_ms: u64) {
        self.deadline = Some(now.after_millis(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Timestamp> {
        self.deadline
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Timestamp) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Fixed-period ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period_ms: u64,
    next_due: Option<Timestamp>,
}

impl Interval {
    /// First tick is due one full period after `now`, like `setInterval`.
    /// A zero period is treated as 1 ms.
    pub fn start(now: Timestamp, period_ms: u64) -> Self {
        let period_ms = period_ms.max(1);
        Interval {
            period_ms,
            next_due: Some(now.after_millis(period_ms)),
        }
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Timestamp> {
        self.next_due
    }

    /// Yield the scheduled time of the next elapsed tick, if any.
    ///
    /// Call in a loop to catch up on every overdue tick in order.
    pub fn poll_one(&mut self, now: Timestamp) -> Option<Timestamp> {
        let due = self.next_due?;
        if now < due {
            return None;
        }
        self.next_due = Some(due.after_millis(self.period_ms));
        Some(due)
    }
}
