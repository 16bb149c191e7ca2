//! Error types for engine configuration.

use thiserror::Error;

/// Result type for configuration-time operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors rejected at construction time.
///
/// Tick and measurement paths never produce errors; a bad value caught here
/// would otherwise surface as an invisible animation defect at runtime.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Animation duration must be positive and finite.
    #[error("duration must be positive and finite, got {0}ms")]
    InvalidDuration(f64),

    /// Delay must be non-negative and finite.
    #[error("delay must be non-negative and finite, got {0}ms")]
    InvalidDelay(f64),

    /// Visibility threshold must lie within [0, 1].
    #[error("visibility threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    /// Counter target must be a finite number.
    #[error("counter target must be finite, got {0}")]
    NonFiniteTarget(f64),

    /// Bezier control-point x values must lie within [0, 1].
    #[error("bezier x values must be within [0, 1], got x1={x1}, x2={x2}")]
    InvalidBezier { x1: f64, x2: f64 },

    /// Frame scheduler step must be positive and finite.
    #[error("frame step must be positive and finite, got {0}ms")]
    InvalidFrameStep(f64),
}
