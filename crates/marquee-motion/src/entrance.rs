//! Entrance transitions for revealed elements.
//!
//! When a subject's reveal latch flips, its visual presentation moves from
//! "hidden/offset" to "visible/settled" with an animated fade and slide. An
//! [`EntranceTransition`] tracks that interpolation for one subject; each is
//! independent, so revealing one element has no effect on any other. A
//! per-subject stagger delay produces the cascading effect when several
//! elements reveal off the same scroll.

use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;
use crate::error::{ConfigError, Result};
use crate::types::{AnimationId, AnimationState};

/// Default entrance length in milliseconds.
pub const DEFAULT_ENTRANCE_MS: f64 = 720.0;
/// Default slide-in offset in logical pixels.
pub const DEFAULT_OFFSET: f64 = 30.0;
/// Default gap between staggered siblings in milliseconds.
pub const DEFAULT_STAGGER_STEP_MS: f64 = 60.0;

/// Configuration for one entrance transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntranceSpec {
    /// Duration of the fade/slide in milliseconds.
    pub duration_ms: f64,
    /// Delay before the transition starts, for stagger effects.
    pub delay_ms: f64,
    /// Easing curve applied to both opacity and offset.
    pub easing: EasingFunction,
    /// Starting vertical offset; settles to 0.
    pub offset: f64,
}

impl Default for EntranceSpec {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_ENTRANCE_MS,
            delay_ms: 0.0,
            easing: EasingFunction::CubicBezier {
                x1: 0.16,
                y1: 1.0,
                x2: 0.3,
                y2: 1.0,
            },
            offset: DEFAULT_OFFSET,
        }
    }
}

impl EntranceSpec {
    /// Create an entrance spec with the default curve and offset.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidDuration`] for a non-positive or
    /// non-finite duration.
    pub fn new(duration_ms: f64) -> Result<Self> {
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(ConfigError::InvalidDuration(duration_ms));
        }
        Ok(Self {
            duration_ms,
            ..Self::default()
        })
    }

    /// Set the start delay.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidDelay`] for a negative or non-finite
    /// delay.
    pub fn with_delay(mut self, delay_ms: f64) -> Result<Self> {
        if !delay_ms.is_finite() || delay_ms < 0.0 {
            return Err(ConfigError::InvalidDelay(delay_ms));
        }
        self.delay_ms = delay_ms;
        Ok(self)
    }

    /// Set the delay from a sibling index and stagger step.
    pub fn with_stagger(self, index: usize, step_ms: f64) -> Result<Self> {
        self.with_delay(index as f64 * step_ms)
    }

    /// Set the easing curve.
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Set the starting offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }
}

/// A running entrance transition for one revealed subject.
#[derive(Debug, Clone)]
pub struct EntranceTransition {
    /// Unique identifier for this transition instance.
    pub id: AnimationId,
    spec: EntranceSpec,
    started_at: Option<f64>,
    progress: f64,
    state: AnimationState,
}

impl EntranceTransition {
    /// Allocate a transition in the hidden/offset state, untriggered.
    pub fn new(spec: EntranceSpec) -> Self {
        Self {
            id: AnimationId::new(),
            spec,
            started_at: None,
            progress: 0.0,
            state: AnimationState::Idle,
        }
    }

    /// Trigger the transition. Idempotent, like [`Counter::start`].
    ///
    /// [`Counter::start`]: crate::counter::Counter::start
    pub fn start(&mut self) -> bool {
        if self.state == AnimationState::Idle {
            self.state = AnimationState::Pending;
            true
        } else {
            false
        }
    }

    /// Advance to wall-clock time `now_ms`. The first tick records the
    /// start timestamp; the delay window runs from there. Returns `true`
    /// while another frame is needed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.state {
            AnimationState::Idle | AnimationState::Finished | AnimationState::Cancelled => false,
            AnimationState::Pending => {
                let t0 = *self.started_at.get_or_insert(now_ms);
                if now_ms - t0 < self.spec.delay_ms {
                    return true;
                }
                self.state = AnimationState::Running;
                self.advance(now_ms)
            }
            AnimationState::Running => self.advance(now_ms),
        }
    }

    fn advance(&mut self, now_ms: f64) -> bool {
        let t0 = self.started_at.unwrap_or(now_ms);
        let active_elapsed = (now_ms - t0 - self.spec.delay_ms).max(0.0);
        let progress = (active_elapsed / self.spec.duration_ms).clamp(0.0, 1.0);
        self.progress = progress;

        if progress < 1.0 {
            true
        } else {
            self.state = AnimationState::Finished;
            false
        }
    }

    /// Stop the transition where it stands.
    pub fn cancel(&mut self) {
        if self.state != AnimationState::Finished {
            self.state = AnimationState::Cancelled;
        }
    }

    /// Raw progress through the active window, 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Eased opacity: 0.0 hidden, exactly 1.0 once settled.
    pub fn opacity(&self) -> f64 {
        if self.state == AnimationState::Finished {
            return 1.0;
        }
        self.spec.easing.evaluate(self.progress)
    }

    /// Eased vertical offset: the configured offset while hidden, exactly
    /// 0.0 once settled.
    pub fn offset_y(&self) -> f64 {
        if self.state == AnimationState::Finished {
            return 0.0;
        }
        (1.0 - self.spec.easing.evaluate(self.progress)) * self.spec.offset
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// True from trigger until completion or cancellation.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// The spec this transition was built from.
    pub fn spec(&self) -> &EntranceSpec {
        &self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.001;

    #[test]
    fn test_spec_validation() {
        assert!(EntranceSpec::new(720.0).is_ok());
        assert_eq!(
            EntranceSpec::new(0.0),
            Err(ConfigError::InvalidDuration(0.0))
        );
        assert_eq!(
            EntranceSpec::new(720.0).unwrap().with_delay(-1.0),
            Err(ConfigError::InvalidDelay(-1.0))
        );
    }

    #[test]
    fn test_stagger_delay() {
        let spec = EntranceSpec::default()
            .with_stagger(3, DEFAULT_STAGGER_STEP_MS)
            .unwrap();
        assert_eq!(spec.delay_ms, 180.0);
    }

    #[test]
    fn test_hidden_until_started() {
        let mut entrance = EntranceTransition::new(EntranceSpec::default());

        assert!(!entrance.tick(0.0));
        assert_eq!(entrance.opacity(), 0.0);
        assert_eq!(entrance.offset_y(), DEFAULT_OFFSET);
    }

    #[test]
    fn test_delay_window_holds_hidden_state() {
        let spec = EntranceSpec::new(500.0)
            .unwrap()
            .with_delay(120.0)
            .unwrap();
        let mut entrance = EntranceTransition::new(spec);
        entrance.start();

        assert!(entrance.tick(0.0));
        assert!(entrance.tick(100.0));
        assert_eq!(entrance.opacity(), 0.0);
        assert_eq!(entrance.offset_y(), DEFAULT_OFFSET);
        assert_eq!(entrance.state(), AnimationState::Pending);

        // Past the delay: running, partway through
        assert!(entrance.tick(370.0));
        assert_eq!(entrance.state(), AnimationState::Running);
        assert!((entrance.progress() - 0.5).abs() < EPSILON);
        assert!(entrance.opacity() > 0.0);
    }

    #[test]
    fn test_settles_exactly() {
        let spec = EntranceSpec::new(720.0).unwrap();
        let mut entrance = EntranceTransition::new(spec);
        entrance.start();

        entrance.tick(0.0);
        entrance.tick(360.0);
        assert!(entrance.tick(719.0));
        assert!(!entrance.tick(720.0));

        assert_eq!(entrance.state(), AnimationState::Finished);
        assert_eq!(entrance.opacity(), 1.0);
        assert_eq!(entrance.offset_y(), 0.0);
    }

    #[test]
    fn test_opacity_and_offset_move_together() {
        let spec = EntranceSpec::new(600.0)
            .unwrap()
            .with_easing(EasingFunction::Linear)
            .with_offset(30.0);
        let mut entrance = EntranceTransition::new(spec);
        entrance.start();

        entrance.tick(0.0);
        entrance.tick(300.0);

        assert!((entrance.opacity() - 0.5).abs() < EPSILON);
        assert!((entrance.offset_y() - 15.0).abs() < EPSILON);
    }

    #[test]
    fn test_cancel_freezes_state() {
        let mut entrance = EntranceTransition::new(EntranceSpec::new(600.0).unwrap());
        entrance.start();
        entrance.tick(0.0);
        entrance.tick(300.0);

        let opacity = entrance.opacity();
        entrance.cancel();

        assert!(!entrance.tick(450.0));
        assert_eq!(entrance.opacity(), opacity);
        assert_eq!(entrance.state(), AnimationState::Cancelled);
    }

    #[test]
    fn test_independent_staggered_entrances() {
        let mut first = EntranceTransition::new(
            EntranceSpec::new(500.0)
                .unwrap()
                .with_easing(EasingFunction::Linear),
        );
        let mut second = EntranceTransition::new(
            EntranceSpec::new(500.0)
                .unwrap()
                .with_easing(EasingFunction::Linear)
                .with_delay(250.0)
                .unwrap(),
        );
        first.start();
        second.start();

        for i in 0..=9 {
            let now = i as f64 * 75.0;
            first.tick(now);
            second.tick(now);
        }

        assert!(first.state() == AnimationState::Finished);
        assert!(second.is_active());
        assert!(second.opacity() < 1.0);
    }
}
