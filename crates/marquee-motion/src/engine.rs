//! Engine coordinating counters, entrances, and reveal triggers.
//!
//! The [`MotionEngine`] is the single entry point the presentation shell
//! talks to. It owns:
//! - counters and entrance transitions, keyed by [`AnimationId`]
//! - the [`RevealTracker`] and the gate maps binding animations to subjects
//! - the [`EventQueue`] of lifecycle events
//!
//! ```text
//! MotionEngine
//!   ├── RevealTracker (one-way latch per subject)
//!   │     └── latch edge starts every gated counter/entrance
//!   ├── Counters (eased numeric climb, exact landing)
//!   └── EntranceTransitions (staggered fade/slide per subject)
//! ```
//!
//! The shell delivers intersection measurements via
//! [`intersection`](MotionEngine::intersection) and frame timestamps via
//! [`frame`](MotionEngine::frame); everything else is reads and teardown.

use std::collections::HashMap;

use tracing::debug;

use crate::counter::{Counter, CounterSpec};
use crate::entrance::{EntranceSpec, EntranceTransition};
use crate::error::Result;
use crate::events::{CounterEvent, EntranceEvent, EventQueue, MotionEvent, RevealEvent};
use crate::reveal::RevealTracker;
use crate::types::{AnimationId, AnimationState};

/// Central coordinator for all view-state animations.
#[derive(Debug, Default)]
pub struct MotionEngine {
    counters: HashMap<AnimationId, Counter>,
    entrances: HashMap<AnimationId, EntranceTransition>,
    tracker: RevealTracker,

    /// Counters started by a subject's reveal latch.
    counter_gates: HashMap<String, Vec<AnimationId>>,
    /// Entrances started by a subject's reveal latch.
    entrance_gates: HashMap<String, Vec<AnimationId>>,

    events: EventQueue,
}

impl MotionEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Subjects
    // ========================================================================

    /// Begin observing a subject at the given visibility threshold.
    pub fn observe(&mut self, subject_id: &str, threshold: f64) -> Result<()> {
        self.tracker.observe(subject_id, threshold)
    }

    /// Stop measurement for a subject; its latch and any already-started
    /// animations are unaffected.
    pub fn unobserve(&mut self, subject_id: &str) {
        self.tracker.unobserve(subject_id);
    }

    /// Whether a subject's reveal flag has latched.
    pub fn is_revealed(&self, subject_id: &str) -> bool {
        self.tracker.is_revealed(subject_id)
    }

    /// Deliver an intersection measurement for a subject.
    ///
    /// On the measurement that latches the reveal flag, every counter and
    /// entrance gated on the subject is started and a
    /// [`RevealEvent::Revealed`] is queued. Because the latch is one-way and
    /// `start` is idempotent, gated animations can never restart off a
    /// re-delivered measurement. Returns `true` only on the latching call.
    pub fn intersection(&mut self, subject_id: &str, visible_ratio: f64) -> bool {
        if !self.tracker.record_intersection(subject_id, visible_ratio) {
            return false;
        }

        self.events.push(RevealEvent::Revealed {
            subject_id: subject_id.to_string(),
        });

        let gated_counters = self
            .counter_gates
            .get(subject_id)
            .map(Vec::len)
            .unwrap_or(0);
        debug!(subject_id, gated_counters, "reveal latched");

        if let Some(ids) = self.counter_gates.get(subject_id) {
            for id in ids {
                if let Some(counter) = self.counters.get_mut(id) {
                    if counter.start() {
                        self.events.push(CounterEvent::Started { counter_id: *id });
                    }
                }
            }
        }
        if let Some(ids) = self.entrance_gates.get(subject_id) {
            for id in ids {
                if let Some(entrance) = self.entrances.get_mut(id) {
                    if entrance.start() {
                        self.events.push(EntranceEvent::Started { entrance_id: *id });
                    }
                }
            }
        }
        true
    }

    // ========================================================================
    // Counters
    // ========================================================================

    /// Add a counter the shell will start manually.
    pub fn add_counter(&mut self, spec: CounterSpec) -> AnimationId {
        let counter = Counter::new(spec);
        let id = counter.id;
        self.counters.insert(id, counter);
        id
    }

    /// Add a counter started by the given subject's reveal latch.
    ///
    /// If the subject has already revealed, the counter starts immediately.
    pub fn gate_counter(&mut self, spec: CounterSpec, subject_id: &str) -> AnimationId {
        let id = self.add_counter(spec);
        self.counter_gates
            .entry(subject_id.to_string())
            .or_default()
            .push(id);
        if self.tracker.is_revealed(subject_id) {
            self.start_counter(id);
        }
        id
    }

    /// Start a counter directly. Idempotent.
    pub fn start_counter(&mut self, id: AnimationId) {
        if let Some(counter) = self.counters.get_mut(&id) {
            if counter.start() {
                self.events.push(CounterEvent::Started { counter_id: id });
            }
        }
    }

    /// Cancel a counter; its value freezes where it stands.
    pub fn cancel_counter(&mut self, id: AnimationId) {
        if let Some(counter) = self.counters.get_mut(&id) {
            if counter.is_running() {
                counter.cancel();
                self.events.push(CounterEvent::Cancelled { counter_id: id });
            }
        }
    }

    /// Tear down a counter entirely (display instance unmounted).
    pub fn remove_counter(&mut self, id: AnimationId) {
        self.cancel_counter(id);
        self.counters.remove(&id);
        for ids in self.counter_gates.values_mut() {
            ids.retain(|gated| *gated != id);
        }
    }

    /// Current display value of a counter, readable at any time.
    pub fn counter_value(&self, id: AnimationId) -> Option<f64> {
        self.counters.get(&id).map(Counter::value)
    }

    /// Lifecycle state of a counter.
    pub fn counter_state(&self, id: AnimationId) -> Option<AnimationState> {
        self.counters.get(&id).map(Counter::state)
    }

    // ========================================================================
    // Entrances
    // ========================================================================

    /// Add an entrance the shell will start manually.
    pub fn add_entrance(&mut self, spec: EntranceSpec) -> AnimationId {
        let entrance = EntranceTransition::new(spec);
        let id = entrance.id;
        self.entrances.insert(id, entrance);
        id
    }

    /// Add an entrance started by the given subject's reveal latch.
    pub fn gate_entrance(&mut self, spec: EntranceSpec, subject_id: &str) -> AnimationId {
        let id = self.add_entrance(spec);
        self.entrance_gates
            .entry(subject_id.to_string())
            .or_default()
            .push(id);
        if self.tracker.is_revealed(subject_id) {
            self.start_entrance(id);
        }
        id
    }

    /// Start an entrance directly. Idempotent.
    pub fn start_entrance(&mut self, id: AnimationId) {
        if let Some(entrance) = self.entrances.get_mut(&id) {
            if entrance.start() {
                self.events.push(EntranceEvent::Started { entrance_id: id });
            }
        }
    }

    /// Cancel an entrance; its visual state freezes where it stands.
    pub fn cancel_entrance(&mut self, id: AnimationId) {
        if let Some(entrance) = self.entrances.get_mut(&id) {
            if entrance.is_active() {
                entrance.cancel();
                self.events.push(EntranceEvent::Cancelled { entrance_id: id });
            }
        }
    }

    /// Tear down an entrance entirely.
    pub fn remove_entrance(&mut self, id: AnimationId) {
        self.cancel_entrance(id);
        self.entrances.remove(&id);
        for ids in self.entrance_gates.values_mut() {
            ids.retain(|gated| *gated != id);
        }
    }

    /// Current opacity of an entrance (0.0 hidden, 1.0 settled).
    pub fn entrance_opacity(&self, id: AnimationId) -> Option<f64> {
        self.entrances.get(&id).map(EntranceTransition::opacity)
    }

    /// Current vertical offset of an entrance (settles to 0.0).
    pub fn entrance_offset_y(&self, id: AnimationId) -> Option<f64> {
        self.entrances.get(&id).map(EntranceTransition::offset_y)
    }

    /// Lifecycle state of an entrance.
    pub fn entrance_state(&self, id: AnimationId) -> Option<AnimationState> {
        self.entrances.get(&id).map(EntranceTransition::state)
    }

    // ========================================================================
    // Frames and teardown
    // ========================================================================

    /// Advance every active animation to wall-clock time `now_ms`.
    ///
    /// Completion events are queued on the frame an animation settles.
    /// Returns `true` while any animation still wants frames.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let mut any_active = false;

        for (id, counter) in self.counters.iter_mut() {
            if !counter.is_running() {
                continue;
            }
            if counter.tick(now_ms) {
                any_active = true;
            } else if counter.is_finished() {
                self.events.push(CounterEvent::Finished { counter_id: *id });
            }
        }

        for (id, entrance) in self.entrances.iter_mut() {
            if !entrance.is_active() {
                continue;
            }
            if entrance.tick(now_ms) {
                any_active = true;
            } else if entrance.state() == AnimationState::Finished {
                self.events.push(EntranceEvent::Ended { entrance_id: *id });
            }
        }

        any_active
    }

    /// Cancel and remove everything gated on one subject, then forget the
    /// subject. Teardown hook for the shell unmounting an anchor element.
    pub fn remove_subject(&mut self, subject_id: &str) {
        if let Some(ids) = self.counter_gates.remove(subject_id) {
            for id in ids {
                self.cancel_counter(id);
                self.counters.remove(&id);
            }
        }
        if let Some(ids) = self.entrance_gates.remove(subject_id) {
            for id in ids {
                self.cancel_entrance(id);
                self.entrances.remove(&id);
            }
        }
        self.tracker.remove(subject_id);
    }

    /// Check if any animation is currently active.
    pub fn has_active_animations(&self) -> bool {
        self.counters.values().any(Counter::is_running)
            || self.entrances.values().any(EntranceTransition::is_active)
    }

    /// Total number of active animations.
    pub fn active_count(&self) -> usize {
        self.counters.values().filter(|c| c.is_running()).count()
            + self.entrances.values().filter(|e| e.is_active()).count()
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Drain all pending events from the queue.
    pub fn drain_events(&mut self) -> impl Iterator<Item = MotionEvent> + '_ {
        self.events.drain()
    }

    /// Check if there are any pending events.
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Pop a single event from the queue.
    pub fn pop_event(&mut self) -> Option<MotionEvent> {
        self.events.pop()
    }
}

// The shell may own the engine on whatever thread runs its UI loop.
static_assertions::assert_impl_all!(MotionEngine: Send);
