//! Eased numeric counters for stat displays.
//!
//! A [`Counter`] climbs from 0 to a target value along an ease-out curve,
//! driven by wall-clock frame timestamps. It starts only on an external
//! trigger edge (typically a reveal latch), settles on the target exactly,
//! and goes silent once cancelled.
//!
//! # Usage
//!
//! ```
//! use marquee_motion::counter::{Counter, CounterSpec};
//!
//! let spec = CounterSpec::new(99.9, 2100.0).unwrap().with_decimal_places(1);
//! let mut counter = Counter::new(spec);
//!
//! counter.start();
//! counter.tick(0.0);      // first frame records the start timestamp
//! counter.tick(1050.0);   // ~96.8
//! counter.tick(2100.0);   // exactly 99.9, finished
//! assert_eq!(counter.value(), 99.9);
//! ```

use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;
use crate::error::{ConfigError, Result};
use crate::types::{AnimationId, AnimationState};

/// Immutable description of one animated counter instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterSpec {
    /// Final displayed value; may be fractional.
    pub target: f64,
    /// Total animation length in milliseconds.
    pub duration_ms: f64,
    /// Rounding precision applied at each tick and at completion.
    pub decimal_places: u32,
    /// Easing curve for the climb.
    pub easing: EasingFunction,
}

impl CounterSpec {
    /// Create a counter spec with zero decimal places and the default curve.
    ///
    /// # Errors
    /// Returns [`ConfigError::NonFiniteTarget`] for a NaN or infinite target,
    /// [`ConfigError::InvalidDuration`] for a non-positive or non-finite
    /// duration.
    pub fn new(target: f64, duration_ms: f64) -> Result<Self> {
        if !target.is_finite() {
            return Err(ConfigError::NonFiniteTarget(target));
        }
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(ConfigError::InvalidDuration(duration_ms));
        }
        Ok(Self {
            target,
            duration_ms,
            decimal_places: 0,
            easing: EasingFunction::default(),
        })
    }

    /// Set the rounding precision.
    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Set the easing curve.
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }
}

/// A running counter animation. Owns its state exclusively; independent
/// counters never interfere with each other.
#[derive(Debug, Clone)]
pub struct Counter {
    /// Unique identifier for this counter instance.
    pub id: AnimationId,
    spec: CounterSpec,
    value: f64,
    started_at: Option<f64>,
    state: AnimationState,
}

impl Counter {
    /// Allocate a counter at value 0, untriggered. Always succeeds.
    pub fn new(spec: CounterSpec) -> Self {
        Self {
            id: AnimationId::new(),
            spec,
            value: 0.0,
            started_at: None,
            state: AnimationState::Idle,
        }
    }

    /// Trigger the counter. Idempotent: repeat calls while running, and
    /// calls after completion or cancellation, are no-ops.
    ///
    /// Returns `true` if this call newly started the counter.
    pub fn start(&mut self) -> bool {
        if self.state == AnimationState::Idle {
            self.state = AnimationState::Pending;
            true
        } else {
            false
        }
    }

    /// Advance the counter to wall-clock time `now_ms`.
    ///
    /// The first tick after [`start`](Self::start) records the start
    /// timestamp. Returns `true` while another frame is needed. Ticks on an
    /// untriggered, finished, or cancelled counter are no-ops.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.state {
            AnimationState::Idle | AnimationState::Finished | AnimationState::Cancelled => false,
            AnimationState::Pending => {
                self.started_at = Some(now_ms);
                self.state = AnimationState::Running;
                self.advance(now_ms)
            }
            AnimationState::Running => self.advance(now_ms),
        }
    }

    fn advance(&mut self, now_ms: f64) -> bool {
        // started_at is always set before entering Running
        let t0 = self.started_at.unwrap_or(now_ms);
        let progress = ((now_ms - t0) / self.spec.duration_ms).clamp(0.0, 1.0);

        if progress < 1.0 {
            let eased = self.spec.easing.evaluate(progress);
            self.value = round_to(eased * self.spec.target, self.spec.decimal_places);
            true
        } else {
            // Land on the target exactly rather than trusting the eased
            // formula's floating-point tail.
            self.value = self.spec.target;
            self.state = AnimationState::Finished;
            false
        }
    }

    /// Stop scheduling further ticks; the value is left as-is.
    ///
    /// A tick that was already queued before this call becomes a no-op.
    pub fn cancel(&mut self) {
        if self.state != AnimationState::Finished {
            self.state = AnimationState::Cancelled;
        }
    }

    /// Current display value, readable at any time.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// True from trigger until completion or cancellation.
    pub fn is_running(&self) -> bool {
        self.state.is_active()
    }

    /// True once the target has been reached.
    pub fn is_finished(&self) -> bool {
        self.state == AnimationState::Finished
    }

    /// The immutable spec this counter was built from.
    pub fn spec(&self) -> &CounterSpec {
        &self.spec
    }
}

/// Round to a fixed number of decimal places.
fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10f64.powi(decimal_places as i32);
    (value * factor).round() / factor
}
