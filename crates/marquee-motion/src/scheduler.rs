//! Frame scheduling abstraction.
//!
//! The engine never owns a display-refresh driver; it consumes wall-clock
//! timestamps pulled from a [`FrameScheduler`]. A host shell adapts its real
//! frame callback source; tests feed synthetic timestamps and get fully
//! deterministic runs.

use std::collections::VecDeque;

use crate::engine::MotionEngine;
use crate::error::{ConfigError, Result};

/// Source of frame timestamps, in milliseconds.
pub trait FrameScheduler {
    /// The next frame's timestamp, or `None` when no more frames will be
    /// delivered (shell torn down, test script exhausted).
    fn next_frame(&mut self) -> Option<f64>;
}

/// Explicit timestamp queue for deterministic tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    frames: VecDeque<f64>,
}

impl ManualScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler that will deliver the given timestamps in order.
    pub fn from_timestamps(timestamps: impl IntoIterator<Item = f64>) -> Self {
        Self {
            frames: timestamps.into_iter().collect(),
        }
    }

    /// Queue one more frame.
    pub fn push(&mut self, timestamp_ms: f64) {
        self.frames.push_back(timestamp_ms);
    }
}

impl FrameScheduler for ManualScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        self.frames.pop_front()
    }
}

/// Fixed-cadence timestamps, standing in for a display-refresh callback.
#[derive(Debug)]
pub struct FixedRateScheduler {
    now_ms: f64,
    step_ms: f64,
    remaining: Option<usize>,
}

impl FixedRateScheduler {
    /// Create an unbounded scheduler starting at t=0.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidFrameStep`] for a non-positive or
    /// non-finite step.
    pub fn new(step_ms: f64) -> Result<Self> {
        if !step_ms.is_finite() || step_ms <= 0.0 {
            return Err(ConfigError::InvalidFrameStep(step_ms));
        }
        Ok(Self {
            now_ms: 0.0,
            step_ms,
            remaining: None,
        })
    }

    /// Cap the number of frames this scheduler will deliver.
    pub fn with_frame_budget(mut self, frames: usize) -> Self {
        self.remaining = Some(frames);
        self
    }

    /// The timestamp the next frame will carry.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some(remaining) = &mut self.remaining {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let frame = self.now_ms;
        self.now_ms += self.step_ms;
        Some(frame)
    }
}

/// Drive the engine until every animation settles or the scheduler runs
/// dry. Returns the number of frames delivered.
pub fn run_until_settled(engine: &mut MotionEngine, scheduler: &mut impl FrameScheduler) -> usize {
    let mut frames = 0;
    while let Some(now_ms) = scheduler.next_frame() {
        frames += 1;
        if !engine.frame(now_ms) {
            break;
        }
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::CounterSpec;

    #[test]
    fn test_manual_scheduler_order() {
        let mut scheduler = ManualScheduler::from_timestamps([0.0, 16.0, 32.0]);
        assert_eq!(scheduler.next_frame(), Some(0.0));
        assert_eq!(scheduler.next_frame(), Some(16.0));

        scheduler.push(48.0);
        assert_eq!(scheduler.next_frame(), Some(32.0));
        assert_eq!(scheduler.next_frame(), Some(48.0));
        assert_eq!(scheduler.next_frame(), None);
    }

    #[test]
    fn test_fixed_rate_validation() {
        assert!(FixedRateScheduler::new(16.0).is_ok());
        assert_eq!(
            FixedRateScheduler::new(0.0).unwrap_err(),
            ConfigError::InvalidFrameStep(0.0)
        );
        assert!(FixedRateScheduler::new(f64::NAN).is_err());
    }

    #[test]
    fn test_fixed_rate_budget() {
        let mut scheduler = FixedRateScheduler::new(10.0).unwrap().with_frame_budget(3);
        assert_eq!(scheduler.next_frame(), Some(0.0));
        assert_eq!(scheduler.next_frame(), Some(10.0));
        assert_eq!(scheduler.next_frame(), Some(20.0));
        assert_eq!(scheduler.next_frame(), None);
    }

    #[test]
    fn test_run_until_settled() {
        let mut engine = MotionEngine::new();
        let id = engine.add_counter(CounterSpec::new(100.0, 500.0).unwrap());
        engine.start_counter(id);

        let mut scheduler = FixedRateScheduler::new(100.0).unwrap().with_frame_budget(1000);
        let frames = run_until_settled(&mut engine, &mut scheduler);

        // t=0..500 inclusive
        assert_eq!(frames, 6);
        assert_eq!(engine.counter_value(id), Some(100.0));
        assert!(!engine.has_active_animations());
    }

    #[test]
    fn test_run_until_scheduler_dry() {
        let mut engine = MotionEngine::new();
        let id = engine.add_counter(CounterSpec::new(100.0, 10_000.0).unwrap());
        engine.start_counter(id);

        let mut scheduler = ManualScheduler::from_timestamps([0.0, 16.0]);
        let frames = run_until_settled(&mut engine, &mut scheduler);

        // Frames stopped mid-animation: the counter holds its value
        assert_eq!(frames, 2);
        assert!(engine.has_active_animations());
        let held = engine.counter_value(id).unwrap();
        assert!(held > 0.0 && held < 100.0);
    }
}
