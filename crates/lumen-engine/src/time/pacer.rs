use std::time::{Duration, Instant};

use super::RefreshRate;

/// Fixed-rate frame limiter.
///
/// The budget is `1000 / hz` whole milliseconds. After a frame's work is done,
/// [`pace`](Self::pace) sleeps out whatever is left of the budget. Frames that
/// overrun are not skipped or caught up; the next frame simply starts late.
#[derive(Debug, Copy, Clone)]
pub struct FramePacer {
    rate: RefreshRate,
    budget: Duration,
}

impl FramePacer {
    pub fn new(rate: RefreshRate) -> Self {
        let budget = Duration::from_millis(u64::from(1000 / rate.hz()));
        Self { rate, budget }
    }

    #[inline]
    pub fn rate(&self) -> RefreshRate {
        self.rate
    }

    /// Per-frame time budget.
    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left in the budget after `elapsed`, or `None` if it is used up.
    #[must_use]
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        if elapsed < self.budget {
            Some(self.budget - elapsed)
        } else {
            None
        }
    }

    /// Sleeps until `frame_start + budget`, if that is still in the future.
    ///
    /// Returns the time slept.
    pub fn pace(&self, frame_start: Instant) -> Duration {
        let elapsed = Instant::now().saturating_duration_since(frame_start);
        match self.remaining(elapsed) {
            Some(slack) => {
                std::thread::sleep(slack);
                slack
            }
            None => Duration::ZERO,
        }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(RefreshRate::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pacer(hz: i64) -> FramePacer {
        FramePacer::new(RefreshRate::from_hz(hz))
    }

    #[test]
    fn budget_truncates_to_whole_milliseconds() {
        assert_eq!(pacer(60).budget(), Duration::from_millis(16));
        assert_eq!(pacer(50).budget(), Duration::from_millis(20));
        assert_eq!(pacer(30).budget(), Duration::from_millis(33));
        assert_eq!(pacer(144).budget(), Duration::from_millis(6));
    }

    #[test]
    fn budget_follows_normalized_rate() {
        // 75 Hz snaps to 60 before the budget is derived.
        assert_eq!(pacer(75).rate().hz(), 60);
        assert_eq!(pacer(75).budget(), Duration::from_millis(16));
        assert_eq!(pacer(0).budget(), Duration::from_millis(16));
    }

    #[test]
    fn remaining_is_budget_minus_elapsed() {
        let p = pacer(60);
        assert_eq!(p.remaining(Duration::ZERO), Some(Duration::from_millis(16)));
        assert_eq!(p.remaining(Duration::from_millis(10)), Some(Duration::from_millis(6)));
    }

    #[test]
    fn overrun_frames_do_not_sleep() {
        let p = pacer(60);
        assert_eq!(p.remaining(Duration::from_millis(16)), None);
        assert_eq!(p.remaining(Duration::from_millis(40)), None);
    }

    #[test]
    fn pace_returns_immediately_for_late_frames() {
        let p = pacer(1000);
        let start = Instant::now() - Duration::from_millis(50);
        assert_eq!(p.pace(start), Duration::ZERO);
    }

    #[test]
    fn pace_sleeps_out_the_slack() {
        let p = pacer(100); // 10ms budget
        let start = Instant::now();
        let slept = p.pace(start);
        assert!(slept <= p.budget());
        assert!(start.elapsed() >= p.budget() - Duration::from_millis(1));
    }
}
