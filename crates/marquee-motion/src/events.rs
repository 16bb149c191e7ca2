//! Lifecycle events emitted by the engine.
//!
//! Events are collected into a queue during trigger and frame processing
//! and polled by the shell afterwards, so reacting to a completion or a
//! reveal never re-enters the engine mid-update.
//!
//! # Usage
//!
//! ```ignore
//! for event in engine.drain_events() {
//!     match event {
//!         MotionEvent::Reveal(RevealEvent::Revealed { subject_id }) => { /* ... */ }
//!         MotionEvent::Counter(CounterEvent::Finished { counter_id }) => { /* ... */ }
//!         _ => {}
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::AnimationId;

/// Event emitted when a counter changes state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CounterEvent {
    /// Counter was triggered and will advance on upcoming frames.
    Started { counter_id: AnimationId },
    /// Counter reached its target exactly.
    Finished { counter_id: AnimationId },
    /// Counter was cancelled before completion.
    Cancelled { counter_id: AnimationId },
}

impl CounterEvent {
    /// Get the counter ID for this event.
    pub fn counter_id(&self) -> AnimationId {
        match self {
            Self::Started { counter_id }
            | Self::Finished { counter_id }
            | Self::Cancelled { counter_id } => *counter_id,
        }
    }
}

/// Event emitted when a subject's reveal flag latches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevealEvent {
    /// The subject crossed its visibility threshold for the first time.
    Revealed { subject_id: String },
}

impl RevealEvent {
    /// Get the subject ID for this event.
    pub fn subject_id(&self) -> &str {
        match self {
            Self::Revealed { subject_id } => subject_id,
        }
    }
}

/// Event emitted when an entrance transition changes state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntranceEvent {
    /// Entrance was triggered (its delay window may still be pending).
    Started { entrance_id: AnimationId },
    /// Entrance settled at full opacity and zero offset.
    Ended { entrance_id: AnimationId },
    /// Entrance was cancelled before settling.
    Cancelled { entrance_id: AnimationId },
}

impl EntranceEvent {
    /// Get the entrance ID for this event.
    pub fn entrance_id(&self) -> AnimationId {
        match self {
            Self::Started { entrance_id }
            | Self::Ended { entrance_id }
            | Self::Cancelled { entrance_id } => *entrance_id,
        }
    }
}

/// Wrapper enum over all engine event kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionEvent {
    /// A counter lifecycle event.
    Counter(CounterEvent),
    /// A reveal latch event.
    Reveal(RevealEvent),
    /// An entrance transition event.
    Entrance(EntranceEvent),
}

impl MotionEvent {
    /// Check if this is a "started" event.
    pub fn is_started(&self) -> bool {
        matches!(
            self,
            Self::Counter(CounterEvent::Started { .. })
                | Self::Entrance(EntranceEvent::Started { .. })
        )
    }

    /// Check if this is a completion event.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            Self::Counter(CounterEvent::Finished { .. })
                | Self::Entrance(EntranceEvent::Ended { .. })
        )
    }

    /// Check if this is a cancellation event.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Counter(CounterEvent::Cancelled { .. })
                | Self::Entrance(EntranceEvent::Cancelled { .. })
        )
    }
}

impl From<CounterEvent> for MotionEvent {
    fn from(event: CounterEvent) -> Self {
        Self::Counter(event)
    }
}

impl From<RevealEvent> for MotionEvent {
    fn from(event: RevealEvent) -> Self {
        Self::Reveal(event)
    }
}

impl From<EntranceEvent> for MotionEvent {
    fn from(event: EntranceEvent) -> Self {
        Self::Entrance(event)
    }
}

/// Queue for collecting events during trigger and frame processing.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<MotionEvent>,
}

impl EventQueue {
    /// Create a new empty event queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event onto the queue.
    pub fn push(&mut self, event: impl Into<MotionEvent>) {
        self.events.push_back(event.into());
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get the number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Pop the next event from the queue.
    pub fn pop(&mut self) -> Option<MotionEvent> {
        self.events.pop_front()
    }

    /// Peek at the next event without removing it.
    pub fn peek(&self) -> Option<&MotionEvent> {
        self.events.front()
    }

    /// Drain all events from the queue, returning an iterator.
    pub fn drain(&mut self) -> impl Iterator<Item = MotionEvent> + '_ {
        self.events.drain(..)
    }

    /// Clear all pending events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
