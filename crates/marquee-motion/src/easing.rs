//! Easing functions for animation timing.
//!
//! This module implements the timing curves the engine reaches:
//! - Linear
//! - Ease, EaseOut (standard CSS bezier curves)
//! - ExpoOut (exponential ease-out, the counter curve)
//! - CubicBezier (custom bezier curves)
//!
//! # Usage
//!
//! ```
//! use marquee_motion::easing::EasingFunction;
//!
//! let ease = EasingFunction::ExpoOut;
//! let progress = ease.evaluate(0.5); // Get eased progress at 50%
//!
//! let custom = EasingFunction::cubic_bezier(0.16, 1.0, 0.3, 1.0).unwrap();
//! let progress = custom.evaluate(0.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Easing function for animation timing.
///
/// Easing functions map a linear progress value (0.0 to 1.0) to an eased
/// output value, controlling the rate of change over time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,

    /// CSS `ease` - Slow start, fast middle, slow end.
    /// Equivalent to `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Ease,

    /// CSS `ease-out` - Fast start, decelerating.
    /// Equivalent to `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,

    /// Exponential ease-out: `1 - 2^(-10 t)`.
    ///
    /// Rises quickly and flattens near completion, producing a "counting up
    /// fast then settling" feel in short (~2s) counters. Evaluates to
    /// exactly 1.0 at t >= 1.
    ExpoOut,

    /// Custom cubic bezier curve.
    /// Parameters: (x1, y1, x2, y2) - control points.
    /// x values must be in [0, 1], y values can be any float.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Default for EasingFunction {
    fn default() -> Self {
        Self::ExpoOut
    }
}

impl EasingFunction {
    /// Evaluate the easing function at the given progress.
    ///
    /// # Arguments
    /// * `t` - Progress value from 0.0 to 1.0 (clamped)
    ///
    /// # Returns
    /// Eased progress value (may be outside 0.0-1.0 for some bezier curves)
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::ExpoOut => expo_out(t),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(*x1, *y1, *x2, *y2, t),
        }
    }

    /// Create a custom cubic bezier easing function.
    ///
    /// # Arguments
    /// * `x1`, `y1` - First control point
    /// * `x2`, `y2` - Second control point
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBezier`] if x1 or x2 are outside [0, 1].
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(ConfigError::InvalidBezier { x1, x2 });
        }
        Ok(Self::CubicBezier { x1, y1, x2, y2 })
    }
}

/// Exponential ease-out, pinned to exactly 1.0 at completion.
fn expo_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}

/// Evaluate a cubic bezier curve at time t.
///
/// This implementation uses Newton-Raphson iteration to find the t parameter
/// on the bezier curve corresponding to the input progress, then evaluates
/// the y coordinate at that point.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, progress: f64) -> f64 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let t = solve_bezier_x(x1, x2, progress);
    bezier_y(y1, y2, t)
}

/// Solve for t in the bezier x equation using Newton-Raphson iteration.
fn solve_bezier_x(x1: f64, x2: f64, target_x: f64) -> f64 {
    let mut t = target_x;

    for _ in 0..8 {
        let x = bezier_x(x1, x2, t) - target_x;
        if x.abs() < 1e-7 {
            break;
        }

        let dx = bezier_x_derivative(x1, x2, t);
        if dx.abs() < 1e-7 {
            break;
        }

        t -= x / dx;
        t = t.clamp(0.0, 1.0);
    }

    t
}

/// Calculate x coordinate on the bezier curve at parameter t.
/// Bezier formula: x(t) = 3(1-t)²t·x1 + 3(1-t)t²·x2 + t³
#[inline]
fn bezier_x(x1: f64, x2: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    3.0 * mt2 * t * x1 + 3.0 * mt * t2 * x2 + t3
}

/// Calculate y coordinate on the bezier curve at parameter t.
#[inline]
fn bezier_y(y1: f64, y2: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    3.0 * mt2 * t * y1 + 3.0 * mt * t2 * y2 + t3
}

/// Calculate derivative of x with respect to t.
/// dx/dt = 3(1-t)²·x1 + 6(1-t)t·(x2-x1) + 3t²·(1-x2)
#[inline]
fn bezier_x_derivative(x1: f64, x2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * x1 + 6.0 * mt * t * (x2 - x1) + 3.0 * t * t * (1.0 - x2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.001;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_linear() {
        let ease = EasingFunction::Linear;
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(0.25), 0.25));
        assert!(approx_eq(ease.evaluate(0.5), 0.5));
        assert!(approx_eq(ease.evaluate(0.75), 0.75));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));
    }

    #[test]
    fn test_expo_out_boundaries() {
        let ease = EasingFunction::ExpoOut;
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        // Exact at completion, not approximately
        assert_eq!(ease.evaluate(1.0), 1.0);

        // 1 - 2^-5 at the midpoint
        assert!(approx_eq(ease.evaluate(0.5), 1.0 - 2f64.powi(-5)));
    }

    #[test]
    fn test_expo_out_monotonic() {
        let ease = EasingFunction::ExpoOut;
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease.evaluate(i as f64 / 100.0);
            assert!(v >= prev, "expo-out decreased at step {}", i);
            prev = v;
        }
    }

    #[test]
    fn test_expo_out_front_loaded() {
        // Fast start, gentle settle: half the curve's rise happens well
        // before half the time has elapsed.
        let ease = EasingFunction::ExpoOut;
        assert!(ease.evaluate(0.25) > 0.8);
        assert!(ease.evaluate(0.5) > 0.95);
    }

    #[test]
    fn test_ease_boundaries() {
        let ease = EasingFunction::Ease;
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));

        // CSS ease (0.25, 0.1, 0.25, 1.0) starts slowly, then accelerates
        let mid = ease.evaluate(0.5);
        assert!(mid > 0.7 && mid < 0.9, "CSS ease mid-point should be ~0.8, got {}", mid);
    }

    #[test]
    fn test_ease_out() {
        let ease = EasingFunction::EaseOut;
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));

        // Ease-out should be faster at start, slower at end
        assert!(ease.evaluate(0.25) > 0.25);
        assert!(ease.evaluate(0.5) > 0.5);
    }

    #[test]
    fn test_custom_bezier() {
        // The entrance curve from the reveal stylesheet
        let ease = EasingFunction::cubic_bezier(0.16, 1.0, 0.3, 1.0).unwrap();
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));

        // Linear equivalent
        let linear_bezier = EasingFunction::CubicBezier {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        };
        assert!(approx_eq(linear_bezier.evaluate(0.5), 0.5));
    }

    #[test]
    fn test_clamping() {
        let ease = EasingFunction::ExpoOut;

        assert!(approx_eq(ease.evaluate(-0.5), 0.0));
        assert_eq!(ease.evaluate(1.5), 1.0);
    }

    #[test]
    fn test_default() {
        assert_eq!(EasingFunction::default(), EasingFunction::ExpoOut);
    }

    #[test]
    fn test_invalid_bezier_x() {
        assert!(EasingFunction::cubic_bezier(-0.1, 0.0, 0.5, 1.0).is_err());
        assert!(EasingFunction::cubic_bezier(0.5, 0.0, 1.5, 1.0).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let ease = EasingFunction::CubicBezier {
            x1: 0.16,
            y1: 1.0,
            x2: 0.3,
            y2: 1.0,
        };
        let json = serde_json::to_string(&ease).unwrap();
        let parsed: EasingFunction = serde_json::from_str(&json).unwrap();
        assert_eq!(ease, parsed);
    }
}
