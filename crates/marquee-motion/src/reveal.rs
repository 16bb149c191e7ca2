//! Viewport reveal tracking.
//!
//! The [`RevealTracker`] watches a set of visual subjects and latches a
//! one-way "revealed" flag per subject the first time its visible-area
//! ratio crosses the subject's threshold. The latch never reverts, even if
//! the subject scrolls back out of view, so observation is released as soon
//! as it flips. Intersection measurements arrive from the host environment;
//! the tracker itself never polls.
//!
//! # Usage
//!
//! ```
//! use marquee_motion::reveal::RevealTracker;
//!
//! let mut tracker = RevealTracker::new();
//! tracker.observe("stats-banner", 0.3).unwrap();
//!
//! assert!(!tracker.is_revealed("stats-banner"));
//! tracker.record_intersection("stats-banner", 0.45);
//! assert!(tracker.is_revealed("stats-banner"));
//! ```

use std::collections::HashMap;

use tracing::warn;

use crate::error::{ConfigError, Result};

/// Per-subject tracking record.
#[derive(Debug, Clone)]
struct SubjectRecord {
    threshold: f64,
    revealed: bool,
    observing: bool,
}

/// Latches a one-way reveal flag per observed subject.
///
/// Subjects are keyed by caller-supplied opaque ids; registration must
/// happen only once the underlying visual element exists.
#[derive(Debug, Default)]
pub struct RevealTracker {
    subjects: HashMap<String, SubjectRecord>,
}

impl RevealTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin observing a subject at the given visibility threshold.
    ///
    /// Re-observing an existing subject updates its threshold and resumes
    /// measurement, but never resets an already-latched flag.
    ///
    /// # Errors
    /// Returns [`ConfigError::ThresholdOutOfRange`] unless the threshold
    /// lies within [0, 1].
    pub fn observe(&mut self, subject_id: &str, threshold: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::ThresholdOutOfRange(threshold));
        }

        self.subjects
            .entry(subject_id.to_string())
            .and_modify(|record| {
                record.threshold = threshold;
                record.observing = !record.revealed;
            })
            .or_insert(SubjectRecord {
                threshold,
                revealed: false,
                observing: true,
            });
        Ok(())
    }

    /// Deliver an intersection measurement for a subject.
    ///
    /// Latches the reveal flag when the visible ratio meets the threshold
    /// and the subject is not yet revealed; observation is released at that
    /// point since no further transition is possible. Returns `true` only
    /// on the measurement that latched.
    pub fn record_intersection(&mut self, subject_id: &str, visible_ratio: f64) -> bool {
        let Some(record) = self.subjects.get_mut(subject_id) else {
            warn!(subject_id, "intersection measurement for unknown subject");
            return false;
        };

        if record.revealed || !record.observing {
            return false;
        }
        if visible_ratio >= record.threshold {
            record.revealed = true;
            record.observing = false;
            return true;
        }
        false
    }

    /// Stop measurement for a subject; an already-latched flag is kept.
    pub fn unobserve(&mut self, subject_id: &str) {
        if let Some(record) = self.subjects.get_mut(subject_id) {
            record.observing = false;
        }
    }

    /// Forget a subject entirely.
    pub fn remove(&mut self, subject_id: &str) {
        self.subjects.remove(subject_id);
    }

    /// Whether a subject's reveal flag has latched.
    pub fn is_revealed(&self, subject_id: &str) -> bool {
        self.subjects
            .get(subject_id)
            .is_some_and(|record| record.revealed)
    }

    /// Whether a subject is still receiving measurements.
    pub fn is_observing(&self, subject_id: &str) -> bool {
        self.subjects
            .get(subject_id)
            .is_some_and(|record| record.observing)
    }

    /// Number of known subjects.
    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    /// Number of subjects whose flag has latched.
    pub fn revealed_count(&self) -> usize {
        self.subjects.values().filter(|r| r.revealed).count()
    }

    /// Drop all subjects.
    pub fn clear(&mut self) {
        self.subjects.clear();
    }
}
