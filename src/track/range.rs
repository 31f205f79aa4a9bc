use std::time::Duration;

use crate::error::RangeError;

/// Smallest distance kept between the loop bounds when one pushes the other.
///
/// Matches the default poll interval: a shorter loop could not be observed.
pub const MIN_LOOP_GAP: Duration = Duration::from_millis(50);

/// The `[start, end)` part of a track that repeats.
///
/// Every value handed out by a track satisfies `start < end <= duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopRange {
    pub start: Duration,
    pub end: Duration,
}

impl LoopRange {
    /// The whole track.
    pub fn full(duration: Duration) -> Self {
        Self {
            start: Duration::ZERO,
            end: duration,
        }
    }

    /// Accept `start..end` as-is, after capping both at `duration`.
    pub fn checked(start: Duration, end: Duration, duration: Duration) -> Result<Self, RangeError> {
        let (start, end) = (start.min(duration), end.min(duration));
        if start >= end {
            return Err(RangeError::InvertedBounds { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a valid range from arbitrary bounds. `start` wins a conflict.
    pub fn clamped(start: Duration, end: Duration, duration: Duration) -> Self {
        Self::full(duration)
            .with_end(end, duration)
            .with_start(start, duration)
    }

    /// Move the start bound, pushing the end forward if the two would cross.
    pub fn with_start(self, t: Duration, duration: Duration) -> Self {
        let gap = min_gap(duration);
        let start = t.min(duration.saturating_sub(gap));
        let end = self.end.min(duration).max(start + gap);
        Self { start, end }
    }

    /// Move the end bound, pulling the start back if the two would cross.
    pub fn with_end(self, t: Duration, duration: Duration) -> Self {
        let gap = min_gap(duration);
        let end = t.min(duration).max(gap);
        let start = self.start.min(end - gap);
        Self { start, end }
    }

    pub fn span(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, t: Duration) -> bool {
        t >= self.start && t < self.end
    }

    /// Pin `t` into `[start, end]`.
    pub fn clamp(&self, t: Duration) -> Duration {
        t.clamp(self.start, self.end)
    }
}

fn min_gap(duration: Duration) -> Duration {
    MIN_LOOP_GAP.min(duration)
}
