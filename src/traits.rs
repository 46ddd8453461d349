//! Core traits for streaming outlier detectors
//!
//! Detectors consume a stream of scalar observations one at a time and
//! judge each new value against what they have learned so far. The
//! [`Detector`] trait is the common surface; [`Status`] is its verdict.

use core::fmt::Debug;

/// Verdict on a single observation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Fewer observations than the training period have been captured
    InTraining,
    /// The value is consistent with the learned distribution
    InOrdinary,
    /// The value falls at or below the density threshold
    Outlier,
}

impl Status {
    /// Check if this is [`Status::Outlier`]
    pub fn is_outlier(&self) -> bool {
        matches!(self, Status::Outlier)
    }

    /// Check if this is [`Status::InTraining`]
    pub fn is_training(&self) -> bool {
        matches!(self, Status::InTraining)
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Status::InTraining => write!(f, "in training"),
            Status::InOrdinary => write!(f, "ordinary"),
            Status::Outlier => write!(f, "outlier"),
        }
    }
}

/// Core trait for streaming outlier detectors
///
/// Observations must be applied in stream order by a single writer; the
/// learned state is only meaningful over a total order of values.
pub trait Detector: Clone + Debug {
    /// Judge `value` against the current state without learning from it
    fn status(&self, value: f64, threshold: f64) -> Status;

    /// Learn from `value`
    fn update(&mut self, value: f64);

    /// Judge `value`, then learn from it
    ///
    /// The verdict never sees the value's own contribution.
    fn observe(&mut self, value: f64, threshold: f64) -> Status {
        let status = self.status(value, threshold);
        self.update(value);
        status
    }

    /// Reset to the untrained state
    fn clear(&mut self);

    /// Number of observations learned from
    fn count(&self) -> u64;

    /// Check if the training period is over
    fn is_trained(&self) -> bool;

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;
}
