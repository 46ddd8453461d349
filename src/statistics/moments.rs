//! Running moments and anomaly scoring
//!
//! Each observation folds into the first moment (`s1`) and the raw second
//! moment (`s2`) with a retention weight `alpha`:
//!
//! ```text
//! s1' = alpha * s1 + (1 - alpha) * x
//! s2' = alpha * s2 + (1 - alpha) * x^2
//! sd' = sqrt(s2' - s1'^2)
//! ```
//!
//! A value is scored by the standard normal density of its z-score
//! against the current mean and standard deviation.

use crate::math;

/// Exponentially weighted mean, second moment and standard deviation
///
/// A value type: [`updated`](Moments::updated) returns a new instance and
/// never mutates the receiver.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Moments {
    /// Weighted mean (first raw moment)
    s1: f64,
    /// Weighted mean of squares (second raw moment)
    s2: f64,
    /// sqrt(s2 - s1^2), variance clamped at zero
    std_dev: f64,
}

impl Moments {
    /// The zero state every stream starts from
    pub const fn new() -> Self {
        Self {
            s1: 0.0,
            s2: 0.0,
            std_dev: 0.0,
        }
    }

    /// Weighted mean
    pub fn mean(&self) -> f64 {
        self.s1
    }

    /// Weighted mean of squares
    pub fn second_moment(&self) -> f64 {
        self.s2
    }

    /// Standard deviation
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Variance (square of [`std_dev`](Moments::std_dev))
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    /// True when the standard deviation cannot scale a residual
    ///
    /// That is the case for the zero state and for any perfectly constant
    /// stream, whose variance is exactly zero.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn is_degenerate(&self) -> bool {
        !(self.std_dev > 0.0 && self.std_dev.is_finite())
    }

    /// Fold `value` in with retention weight `alpha`
    ///
    /// `alpha` is the share kept from the current estimate; `1 - alpha`
    /// goes to `value`. Floating-point drift can make `s2 < s1^2`, so the
    /// variance is clamped at zero before taking the root.
    pub fn updated(&self, alpha: f64, value: f64) -> Self {
        let s1 = alpha * self.s1 + (1.0 - alpha) * value;
        let s2 = alpha * self.s2 + (1.0 - alpha) * value * value;
        let variance = s2 - s1 * s1;
        let std_dev = if variance > 0.0 { math::sqrt(variance) } else { 0.0 };

        Self { s1, s2, std_dev }
    }

    /// Standardized residual of `value` against the current estimate
    ///
    /// With a degenerate standard deviation the residual cannot be scaled:
    /// a value equal to the mean (within a few ulps) scores 0, any other
    /// value scores an infinity carrying the residual's sign.
    pub fn z_score(&self, value: f64) -> f64 {
        let residual = value - self.s1;

        if !self.is_degenerate() {
            return residual / self.std_dev;
        }

        let scale = math::abs(value).max(math::abs(self.s1)).max(1.0);
        if math::abs(residual) <= f64::EPSILON * scale {
            0.0
        } else if residual > 0.0 {
            f64::INFINITY
        } else if residual < 0.0 {
            f64::NEG_INFINITY
        } else {
            // NaN residual
            f64::NAN
        }
    }

    /// Standard normal density at the z-score of `value`
    ///
    /// Ranges over [0, ~0.3989]; it is a density, not a probability.
    pub fn density(&self, value: f64) -> f64 {
        math::normal_pdf(self.z_score(value))
    }

    /// Whether `value` is at least as surprising as `threshold` allows
    ///
    /// Equivalent to `density(value) <= threshold`, except that a NaN
    /// density or threshold counts as anomalous.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn is_anomaly(&self, threshold: f64, value: f64) -> bool {
        !(self.density(value) > threshold)
    }
}
