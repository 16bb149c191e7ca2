//! View-state animation engine for reveal-driven page motion.
//!
//! This crate provides:
//! - **Counters**: eased numeric climbs toward a target value, started on an
//!   external trigger edge and landing on the target exactly
//! - **Reveal Tracking**: a one-way "revealed" latch per observed subject,
//!   flipped the first time the subject crosses its visibility threshold
//! - **Entrances**: staggered fade/slide transitions driven by those latches
//! - **Formatting**: pure value-to-display-string rules for stat counters
//!
//! # Architecture
//!
//! ```text
//! MotionEngine
//!   ├── RevealTracker (latch per subject; releases observation on latch)
//!   ├── Counters      (gated or manual, one CounterState each)
//!   └── Entrances     (gated or manual, per-subject stagger)
//!
//! FrameScheduler
//!   └── Supplies wall-clock timestamps; the engine never polls or blocks
//! ```
//!
//! The host shell registers subjects and animations, forwards intersection
//! measurements, and pulls one frame at a time. Everything is
//! single-threaded and deterministic: identical timestamps and measurements
//! produce identical value sequences, so tests run without a display or
//! layout engine.

pub mod counter;
pub mod easing;
pub mod engine;
pub mod entrance;
pub mod error;
pub mod events;
pub mod format;
pub mod reveal;
pub mod scheduler;
pub mod types;

pub use counter::{Counter, CounterSpec};
pub use easing::EasingFunction;
pub use engine::MotionEngine;
pub use entrance::{
    DEFAULT_ENTRANCE_MS, DEFAULT_OFFSET, DEFAULT_STAGGER_STEP_MS, EntranceSpec, EntranceTransition,
};
pub use error::{ConfigError, Result};
pub use events::{CounterEvent, EntranceEvent, EventQueue, MotionEvent, RevealEvent};
pub use format::StatFormat;
pub use reveal::RevealTracker;
pub use scheduler::{FixedRateScheduler, FrameScheduler, ManualScheduler, run_until_settled};
pub use types::{AnimationId, AnimationState};
