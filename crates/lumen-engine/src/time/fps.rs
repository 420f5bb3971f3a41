use std::time::Instant;

/// Frames per second over `elapsed_secs`.
///
/// Returns `0.0` until any time has passed.
#[inline]
#[must_use]
pub fn fps_from(frames: u64, elapsed_secs: f32) -> f32 {
    if elapsed_secs > 0.0 {
        frames as f32 / elapsed_secs
    } else {
        0.0
    }
}

/// On-screen label for a rate, e.g. `"59.94 fps"`.
pub fn fps_label(fps: f32) -> String {
    format!("{fps:.2} fps")
}

/// Primitive FPS tracker: total frames over total time since start.
///
/// There is no averaging window. The value converges slowly after a stall,
/// which is fine for an on-screen counter.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u64,
    start: Instant,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self { frames: 0, start, fps: 0.0 }
    }

    /// Counts one finished frame and recomputes the rate.
    pub fn frame(&mut self) -> f32 {
        self.frame_at(Instant::now())
    }

    /// Like [`frame`](Self::frame) with an explicit timestamp.
    pub fn frame_at(&mut self, now: Instant) -> f32 {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.start);
        self.fps = fps_from(self.frames, elapsed.as_secs_f32());
        self.fps
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn hundred_frames_over_two_seconds_is_fifty() {
        assert_eq!(fps_from(100, 2.0), 50.0);
    }

    #[test]
    fn zero_elapsed_reports_zero() {
        assert_eq!(fps_from(10, 0.0), 0.0);
    }

    #[test]
    fn counter_accumulates_frames() {
        let start = Instant::now();
        let mut c = FpsCounter::starting_at(start);
        for _ in 0..99 {
            c.frame_at(start + Duration::from_millis(1000));
        }
        let fps = c.frame_at(start + Duration::from_secs(2));
        assert_eq!(c.frames(), 100);
        assert_eq!(fps, 50.0);
        assert_eq!(c.fps(), 50.0);
    }

    #[test]
    fn clock_going_backwards_does_not_panic() {
        let start = Instant::now() + Duration::from_secs(5);
        let mut c = FpsCounter::starting_at(start);
        assert_eq!(c.frame_at(Instant::now()), 0.0);
    }

    #[test]
    fn label_has_two_decimals() {
        let start = Instant::now();
        let mut c = FpsCounter::starting_at(start);
        assert_eq!(fps_label(c.fps()), "0.00 fps");
        c.frame_at(start + Duration::from_secs(3));
        assert_eq!(fps_label(c.fps()), "0.33 fps");
    }
}
