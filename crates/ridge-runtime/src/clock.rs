//! Frame clock with FPS sampling

use std::time::Instant;

/// Longest frame the clock will report, in seconds
const MAX_FRAME_TIME: f64 = 0.25;

/// Tracks frame time for movement scaling and reports FPS once per interval
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// How often `fps()` is refreshed, in seconds
    pub fps_interval: f64,
    last_instant: Instant,
    first_tick: bool,
    frames_in_interval: u32,
    interval_time: f64,
    fps: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fps_interval: 1.0,
            last_instant: Instant::now(),
            first_tick: true,
            frames_in_interval: 0,
            interval_time: 0.0,
            fps: 0.0,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock. Call once per frame.
    ///
    /// Returns the new FPS figure whenever an interval completes.
    pub fn tick(&mut self) -> Option<f64> {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return None;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed)
    }

    fn advance(&mut self, elapsed: f64) -> Option<f64> {
        // Clamp so a stalled frame (window drag, breakpoint) doesn't teleport the camera
        self.delta_time = elapsed.min(MAX_FRAME_TIME);
        self.total_time += self.delta_time;

        self.frames_in_interval += 1;
        self.interval_time += elapsed;
        if self.interval_time >= self.fps_interval {
            self.fps = self.frames_in_interval as f64 / self.interval_time;
            self.frames_in_interval = 0;
            self.interval_time = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    /// Most recently measured frames per second
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::new();
        assert!(clock.tick().is_none());
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(3.0);
        assert!((clock.delta_time - MAX_FRAME_TIME).abs() < 1e-12);
        assert!((clock.total_time - MAX_FRAME_TIME).abs() < 1e-12);
    }

    #[test]
    fn test_fps_reported_once_per_interval() {
        let mut clock = FrameClock::new();
        let frame = 1.0 / 50.0;
        let mut reports = Vec::new();
        for _ in 0..120 {
            if let Some(fps) = clock.advance(frame) {
                reports.push(fps);
            }
        }
        assert_eq!(reports.len(), 2);
        assert!((reports[0] - 50.0).abs() < 1.0);
        assert!((clock.fps() - 50.0).abs() < 1.0);
    }
}
