//! Time management for the render loop.

use std::time::{Duration, Instant};

/// Longest frame delta handed to the simulation. Stalls beyond this are
/// swallowed rather than fed into the accumulator (spiral-of-death guard).
pub const MAX_FRAME_DELTA: f32 = 1.0 / 30.0;

/// Manages frame timing and the fixed-timestep accumulator.
#[derive(Debug)]
pub struct Time {
    /// Time when the loop started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Clamped duration of the last frame, in seconds.
    delta: f32,
    /// Accumulated simulated time (sum of clamped deltas), in seconds.
    elapsed: f32,
    /// Frame count since start.
    frame_count: u64,
    /// Fixed timestep for orbit integration (120 Hz).
    fixed_timestep: f32,
    /// Accumulated time for fixed updates.
    accumulator: f32,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame: now,
            delta: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            fixed_timestep: 1.0 / 120.0,
            accumulator: 0.0,
        }
    }

    /// Update timing at the start of a new frame. The raw wall-clock delta is
    /// clamped to [`MAX_FRAME_DELTA`] before anything downstream sees it.
    pub fn update(&mut self) {
        let now = Instant::now();
        let raw = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(raw);
    }

    /// Advance by an explicit delta. Used by `update` and by tests that need
    /// deterministic frame lengths.
    pub fn advance(&mut self, raw_delta: f32) {
        self.delta = raw_delta.min(MAX_FRAME_DELTA);
        self.elapsed += self.delta;
        self.frame_count += 1;
        self.accumulator += self.delta;
    }

    /// Get the clamped delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Total simulated time in seconds. Drives the cosmetic animations.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }

    /// Wall-clock time since start (unclamped).
    pub fn since_start(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep
    }

    /// Check if a fixed update should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            true
        } else {
            false
        }
    }

    /// Current FPS (over the last frame).
    pub fn fps(&self) -> f32 {
        if self.delta > 0.0 {
            1.0 / self.delta
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_delta_is_clamped() {
        let mut time = Time::new();
        time.advance(0.5);
        assert_eq!(time.delta_seconds(), MAX_FRAME_DELTA);
        assert_eq!(time.elapsed_seconds(), MAX_FRAME_DELTA);
    }

    #[test]
    fn accumulator_yields_expected_step_count() {
        let mut time = Time::new();
        // One 60 Hz frame holds two 120 Hz steps.
        time.advance(1.0 / 60.0);
        let mut steps = 0;
        while time.should_fixed_update() {
            steps += 1;
        }
        assert_eq!(steps, 2);
    }

    #[test]
    fn leftover_fraction_carries_between_frames() {
        let mut time = Time::new();
        // 10 ms = one 120 Hz step plus ~1.7 ms left over.
        time.advance(0.010);
        assert!(time.should_fixed_update());
        assert!(!time.should_fixed_update());
        // Next 10 ms frame: leftover pushes the accumulator over one step.
        time.advance(0.010);
        assert!(time.should_fixed_update());
        assert!(!time.should_fixed_update());
    }

    #[test]
    fn short_frame_runs_zero_steps() {
        let mut time = Time::new();
        time.advance(1.0 / 500.0);
        assert!(!time.should_fixed_update());
    }
}
