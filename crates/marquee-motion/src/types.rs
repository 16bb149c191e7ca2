//! Core identifier and state types shared by counters and entrances.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for an animation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

impl AnimationId {
    /// Generate a new unique animation ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for AnimationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Current state of a counter or entrance animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    /// Created but not yet triggered.
    Idle,
    /// Triggered; waiting for the first frame (or for a configured delay).
    Pending,
    /// Actively advancing.
    Running,
    /// Completed normally; final value applied exactly.
    Finished,
    /// Cancelled before completion; value left as-is.
    Cancelled,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::Idle
    }
}

impl AnimationState {
    /// True while the animation wants frame callbacks.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_id_uniqueness() {
        let id1 = AnimationId::new();
        let id2 = AnimationId::new();
        let id3 = AnimationId::new();

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_animation_state_default() {
        assert_eq!(AnimationState::default(), AnimationState::Idle);
    }

    #[test]
    fn test_animation_state_activity() {
        assert!(!AnimationState::Idle.is_active());
        assert!(AnimationState::Pending.is_active());
        assert!(AnimationState::Running.is_active());
        assert!(!AnimationState::Finished.is_active());
        assert!(!AnimationState::Cancelled.is_active());
    }
}
