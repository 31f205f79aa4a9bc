use std::time::{Duration, Instant};

/// Single-shot poll deadline.
///
/// The host loop sleeps until [`remaining`](Self::remaining) runs out, then
/// calls [`fire`](Self::fire). Firing disarms the timer; the owner re-arms it
/// only after the tick has finished, so ticks never overlap.
#[derive(Debug, Clone)]
pub struct PollTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl PollTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Time left until the deadline; `None` when disarmed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Disarm and return `true` if the deadline has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
