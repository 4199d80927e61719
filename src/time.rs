//! Simulation clock.
//!
//! Provides the single source of truth for time across a run. The clock
//! starts at zero on the first frame and only ever moves forward; scaling
//! speeds the animation up or slows it down without making time jump.
//!
//! # Example
//!
//! ```
//! use particle_bounce::time::Time;
//!
//! let mut time = Time::new();
//! time.set_time_scale(1.5);
//! let now = time.advance(0.5);
//! assert!((now - 0.75).abs() < 1e-6);
//! assert_eq!(time.frame(), 1);
//! ```

use std::time::{Duration, Instant};

/// Wall-clock span over which the frame rate is averaged.
const FPS_WINDOW: Duration = Duration::from_millis(500);

/// Frame clock for animation and camera movement.
#[derive(Debug)]
pub struct Time {
    last_sample: Instant,
    /// Scaled seconds since the first frame.
    now: f32,
    /// Scaled seconds covered by the last frame.
    delta: f32,
    frames: u64,
    /// Multiplier applied to wall-clock deltas.
    scale: f32,
    fps: FpsCounter,
}

impl Time {
    /// Create a new clock starting from now.
    pub fn new() -> Self {
        let start = Instant::now();
        Self {
            last_sample: start,
            now: 0.0,
            delta: 0.0,
            frames: 0,
            scale: 1.0,
            fps: FpsCounter::new(start),
        }
    }

    /// Sample the wall clock and advance. Call once per frame.
    ///
    /// Returns the current simulation time.
    pub fn update(&mut self) -> f32 {
        let sample = Instant::now();
        let raw_delta = sample.duration_since(self.last_sample).as_secs_f32();
        self.last_sample = sample;
        self.fps.tick(sample);
        self.advance(raw_delta)
    }

    /// Restart from zero at the current instant, keeping the time scale.
    pub fn restart(&mut self) {
        *self = Self {
            scale: self.scale,
            ..Self::new()
        };
    }

    /// Advance by `raw_delta` unscaled seconds without touching the wall clock.
    ///
    /// Negative deltas are treated as zero so time never runs backwards.
    pub fn advance(&mut self, raw_delta: f32) -> f32 {
        self.delta = raw_delta.max(0.0) * self.scale;
        self.now += self.delta;
        self.frames += 1;
        self.now
    }

    /// Simulation time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.now
    }

    /// Scaled time covered by the last frame.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frames
    }

    /// Frames per wall-clock second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps.value
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.scale
    }

    /// Set the clock speed relative to wall-clock time. Negative values
    /// clamp to zero, which pauses the animation.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.scale = scale.max(0.0);
    }
}

/// Averages the frame rate over [`FPS_WINDOW`].
#[derive(Debug)]
struct FpsCounter {
    window_start: Instant,
    frames: u32,
    value: f32,
}

impl FpsCounter {
    fn new(start: Instant) -> Self {
        Self {
            window_start: start,
            frames: 0,
            value: 0.0,
        }
    }

    fn tick(&mut self, sample: Instant) {
        self.frames += 1;
        let span = sample.duration_since(self.window_start);
        if span >= FPS_WINDOW {
            self.value = self.frames as f32 / span.as_secs_f32();
            self.frames = 0;
            self.window_start = sample;
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.elapsed(), 0.0);
        assert_eq!(time.time_scale(), 1.0);
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let elapsed = time.update();

        assert!(elapsed > 0.0);
        assert_eq!(elapsed, time.elapsed());
        assert!(time.delta() > 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_time_scale() {
        let mut time = Time::new();
        time.set_time_scale(2.0);
        time.advance(0.25);
        assert_eq!(time.delta(), 0.5);
        assert_eq!(time.elapsed(), 0.5);

        // Negative scale should clamp to 0
        time.set_time_scale(-1.0);
        assert_eq!(time.time_scale(), 0.0);
        time.advance(1.0);
        assert_eq!(time.elapsed(), 0.5);
    }

    #[test]
    fn test_scale_change_does_not_jump() {
        let mut time = Time::new();
        time.advance(1.0);
        time.set_time_scale(0.1);
        let before = time.elapsed();
        let after = time.advance(0.5);
        assert!(after >= before);
        assert!((after - 1.05).abs() < 1e-6);
    }

    #[test]
    fn test_restart_keeps_scale() {
        let mut time = Time::new();
        time.set_time_scale(1.5);
        time.advance(2.0);
        time.restart();
        assert_eq!(time.elapsed(), 0.0);
        assert_eq!(time.frame(), 0);
        assert_eq!(time.time_scale(), 1.5);
    }

    #[test]
    fn test_fps_window() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);
        for i in 1..=30 {
            counter.tick(start + Duration::from_millis(i * 10));
        }
        // 30 frames over 300 ms: window not yet full
        assert_eq!(counter.value, 0.0);
        for i in 31..=50 {
            counter.tick(start + Duration::from_millis(i * 10));
        }
        assert!((counter.value - 100.0).abs() < 1e-3);
        assert_eq!(counter.frames, 0);
    }

    #[test]
    fn test_negative_delta_is_ignored() {
        let mut time = Time::new();
        time.advance(1.0);
        time.advance(-3.0);
        assert_eq!(time.elapsed(), 1.0);
        assert_eq!(time.delta(), 0.0);
    }
}
