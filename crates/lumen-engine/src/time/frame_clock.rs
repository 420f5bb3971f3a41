use std::time::{Duration, Instant};

/// Timing snapshot for one frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Time since the clock was created. Never decreases.
    pub elapsed: Duration,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Zero-based frame counter.
    pub frame_index: u64,
}

/// Per-loop clock producing [`FrameTime`] snapshots.
///
/// Delta time is clamped so that a stall (debugger, window drag, minimized
/// surface) shows up as one long-but-bounded frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            frame_index: 0,
            dt_max: Duration::from_millis(250),
        }
    }

    /// Advances the clock.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock using an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now.max(self.last);

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.last.saturating_duration_since(self.start),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_counts_from_zero() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.tick_at(start).frame_index, 0);
        assert_eq!(clock.tick_at(start).frame_index, 1);
    }

    #[test]
    fn dt_is_clamped_after_a_stall() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let ft = clock.tick_at(start + Duration::from_secs(3));
        assert_eq!(ft.dt, 0.25);
        assert_eq!(ft.elapsed, Duration::from_secs(3));
    }

    #[test]
    fn elapsed_never_decreases() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let a = clock.tick_at(start + Duration::from_millis(20));
        let b = clock.tick_at(start + Duration::from_millis(10));
        assert!(b.elapsed >= a.elapsed);
        assert_eq!(b.dt, 0.0);
    }
}
