//! Probabilistic exponentially weighted moving average
//!
//! PEWMA keeps an EWMA of a stream's first two moments, but chooses the
//! blend weight per observation from how probable that observation looks
//! under the current estimate. Ordinary values are blended in strongly;
//! improbable ones barely move the estimate, so a burst of outliers does
//! not drag the baseline along with it.
//!
//! # Algorithm
//!
//! For observation `x_t` with `n` values already in the history:
//!
//! ```text
//! if n < T:  alpha_t = 1 - 1/(n+1)              (cumulative average)
//! else:      alpha_t = (1 - beta * P_t) * alpha0
//!            P_t     = exp(-Z_t^2 / 2) / sqrt(2*pi)
//!            Z_t     = (x_t - s1) / sd
//! ```
//!
//! followed by the moment update in [`Moments::updated`]. `P_t` is always
//! taken from the state *before* `x_t` is folded in.
//!
//! # Reference
//!
//! Carter, K.M. and Streilein, W.W. (2012). "Probabilistic reasoning for
//! streaming anomaly detection", *IEEE Statistical Signal Processing
//! Workshop*, pp. 377-380.

use crate::config::Config;
use crate::statistics::Moments;
use crate::traits::{Detector, Status};
use crate::window::RingWindow;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// PEWMA outlier detector over a single scalar stream
///
/// # Example
///
/// ```
/// use pewma::{Config, Pewma, Status};
///
/// let config = Config::new(5, 0.9, 0.3).unwrap();
/// let mut detector = Pewma::new(config);
///
/// for value in [1.0, 1.0, 1.0, 1.0, 1.0] {
///     assert_eq!(detector.observe(value, 0.01), Status::InTraining);
/// }
///
/// assert_eq!(detector.classify(1.0, 0.01), Status::InOrdinary);
/// assert_eq!(detector.classify(1000.0, 0.01), Status::Outlier);
/// ```
#[derive(Clone, Debug)]
pub struct Pewma {
    config: Config,
    /// Most recent observations, capped at the training period
    history: RingWindow,
    moments: Moments,
    /// Observations accepted since creation or the last clear
    count: u64,
}

impl Pewma {
    /// Create an untrained detector with zero moments
    pub fn new(config: Config) -> Self {
        Self {
            config,
            history: RingWindow::new(config.training_period()),
            moments: Moments::new(),
            count: 0,
        }
    }

    /// Coefficients this detector was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current moment estimates
    pub fn moments(&self) -> &Moments {
        &self.moments
    }

    /// Most recent observations, oldest first
    pub fn history(&self) -> &RingWindow {
        &self.history
    }

    /// Number of observations in the history
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Check if no observation has been captured
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Total observations accepted, not capped by the window
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Check if the history has reached the training period
    pub fn is_trained(&self) -> bool {
        self.history.len() >= self.config.training_period()
    }

    /// Current weighted mean
    pub fn mean(&self) -> f64 {
        self.moments.mean()
    }

    /// Current weighted standard deviation
    pub fn std_dev(&self) -> f64 {
        self.moments.std_dev()
    }

    /// Retention weight that ingesting `value` now would use
    ///
    /// During training this is `1 - 1/(n+1)` for `n` captured values,
    /// afterwards `(1 - beta * density(value)) * alpha0`. A non-finite
    /// `value` has zero density and gets `alpha0`.
    pub fn weight(&self, value: f64) -> f64 {
        let n = self.history.len();
        if n < self.config.training_period() {
            return 1.0 - 1.0 / (n as f64 + 1.0);
        }
        if !value.is_finite() {
            return self.config.alpha0();
        }
        (1.0 - self.config.beta() * self.moments.density(value)) * self.config.alpha0()
    }

    /// Classify `value` against the current state without ingesting it
    ///
    /// Returns [`Status::InTraining`] until the training period is filled.
    /// Afterwards a value whose density is at or below `threshold` is an
    /// [`Status::Outlier`]; non-finite values always are. The density test
    /// is the one of [`Moments::is_anomaly`].
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn classify(&self, value: f64, threshold: f64) -> Status {
        if !self.is_trained() {
            return Status::InTraining;
        }
        let density = self.moments.density(value);
        if !value.is_finite() || !(density > threshold) {
            tracing::trace!(value, density, threshold, "pewma outlier");
            return Status::Outlier;
        }
        Status::InOrdinary
    }

    /// Fold `value` into the moments and the history
    ///
    /// The weight is computed from the pre-update state. Values whose
    /// square is not finite (NaN, infinities and magnitudes above ~1.34e154)
    /// would poison the second moment for good, so they are dropped and
    /// leave the detector unchanged.
    pub fn ingest(&mut self, value: f64) {
        if !(value * value).is_finite() {
            tracing::debug!(value, "dropping observation with non-finite square");
            return;
        }

        let snapshot = self.moments;
        let alpha = self.weight(value);
        self.moments = snapshot.updated(alpha, value);
        self.history.push(value);
        self.count += 1;

        if self.count == self.config.training_period() as u64 {
            tracing::debug!(
                training_period = self.config.training_period(),
                mean = self.moments.mean(),
                std_dev = self.moments.std_dev(),
                "pewma training complete"
            );
        }
    }

    /// Functional form of [`ingest`](Pewma::ingest)
    ///
    /// Returns the detector that results from ingesting `value`, leaving
    /// `self` untouched.
    pub fn with_value(&self, value: f64) -> Self {
        let mut next = self.clone();
        next.ingest(value);
        next
    }

    /// Classify `value`, then ingest it
    pub fn observe(&mut self, value: f64, threshold: f64) -> Status {
        let status = self.classify(value, threshold);
        self.ingest(value);
        status
    }

    /// Observe every value of `data` in order
    ///
    /// # Complexity
    ///
    /// Time: O(n), Space: O(n)
    pub fn analyze(&mut self, data: &[f64], threshold: f64) -> Vec<Status> {
        data.iter().map(|&v| self.observe(v, threshold)).collect()
    }

    /// Reset to the empty, untrained state
    pub fn clear(&mut self) {
        self.history.clear();
        self.moments = Moments::new();
        self.count = 0;
    }
}

impl Detector for Pewma {
    fn status(&self, value: f64, threshold: f64) -> Status {
        self.classify(value, threshold)
    }

    fn update(&mut self, value: f64) {
        self.ingest(value);
    }

    fn clear(&mut self) {
        Pewma::clear(self);
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn is_trained(&self) -> bool {
        Pewma::is_trained(self)
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>() + self.history.capacity() * core::mem::size_of::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    fn detector(training_period: usize) -> Pewma {
        Pewma::new(Config::new(training_period, 0.9, 0.3).unwrap())
    }

    #[test]
    fn test_new() {
        let p = detector(5);

        assert!(p.is_empty());
        assert!(!p.is_trained());
        assert_eq!(p.count(), 0);
        assert_eq!(*p.moments(), Moments::new());
        assert_eq!(p.history().capacity(), 5);
    }

    #[test]
    fn test_training_weights() {
        let mut p = detector(4);
        let expected = [0.0, 0.5, 2.0 / 3.0, 0.75];

        for (i, &alpha) in expected.iter().enumerate() {
            assert!(
                (p.weight(100.0) - alpha).abs() < 1e-12,
                "weight at n={} should be {}",
                i,
                alpha
            );
            p.ingest(i as f64);
        }
    }

    #[test]
    fn test_trained_weight() {
        let mut p = detector(3);
        for v in [1.0, 2.0, 3.0] {
            p.ingest(v);
        }

        let density = p.moments().density(2.5);
        let expected = (1.0 - 0.3 * density) * 0.9;
        assert!((p.weight(2.5) - expected).abs() < 1e-12);

        // A far value has ~zero density, keeping alpha0
        assert!((p.weight(1e6) - 0.9).abs() < 1e-12);
        // Ordinary values get a smaller weight than outliers
        assert!(p.weight(p.mean()) < p.weight(1e6));
    }

    #[test]
    fn test_warmup_is_cumulative_mean() {
        let mut p = detector(3);
        for v in [10.0, 10.0, 10.0] {
            p.ingest(v);
        }
        assert_eq!(p.mean(), 10.0);
        assert_eq!(p.std_dev(), 0.0);

        let mut p = detector(4);
        for v in [1.0, 2.0, 3.0, 6.0] {
            p.ingest(v);
        }
        assert!((p.mean() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_classify_in_training() {
        let mut p = detector(3);

        for v in [5.0, 1e9, -7.0] {
            assert_eq!(p.classify(v, 0.01), Status::InTraining);
            assert_eq!(p.classify(f64::NAN, 0.01), Status::InTraining);
            p.ingest(v);
        }
        assert!(p.is_trained());
    }

    #[test]
    fn test_scenario() {
        let mut p = detector(5);
        for _ in 0..5 {
            p.ingest(1.0);
        }

        assert_eq!(p.classify(1.0, 0.01), Status::InOrdinary);
        assert_eq!(p.classify(1000.0, 0.01), Status::Outlier);
    }

    #[test]
    fn test_classify_is_pure() {
        let mut p = detector(3);
        for v in [1.0, 2.0, 3.0] {
            p.ingest(v);
        }
        let moments = *p.moments();

        let first = p.classify(50.0, 0.01);
        let second = p.classify(50.0, 0.01);

        assert_eq!(first, second);
        assert_eq!(*p.moments(), moments);
        assert_eq!(p.count(), 3);
    }

    #[test]
    fn test_classify_non_finite() {
        let mut p = detector(3);
        for v in [1.0, 2.0, 3.0] {
            p.ingest(v);
        }

        assert_eq!(p.classify(f64::NAN, 0.01), Status::Outlier);
        assert_eq!(p.classify(f64::INFINITY, 0.01), Status::Outlier);
        assert_eq!(p.classify(f64::NEG_INFINITY, 0.01), Status::Outlier);
    }

    #[test]
    fn test_non_finite_ingest_dropped() {
        let mut p = detector(3);
        p.ingest(1.0);
        p.ingest(f64::NAN);
        p.ingest(f64::INFINITY);
        p.ingest(2.0);

        assert_eq!(p.len(), 2);
        assert_eq!(p.count(), 2);
        assert_eq!(p.history().to_vec(), vec![1.0, 2.0]);
        assert!((p.mean() - 1.5).abs() < 1e-12);
        assert!(!p.mean().is_nan());
    }

    #[test]
    fn test_overflowing_square_dropped() {
        let mut p = detector(10);
        for i in 0..50 {
            p.ingest(10.0 + if i % 2 == 0 { 0.5 } else { -0.5 });
        }
        let moments = *p.moments();

        assert_eq!(p.observe(1e160, 0.01), Status::Outlier);
        assert_eq!(p.observe(-1e160, 0.01), Status::Outlier);
        assert_eq!(*p.moments(), moments);
        assert_eq!(p.count(), 50);

        for i in 0..1000 {
            p.ingest(10.0 + if i % 2 == 0 { 0.5 } else { -0.5 });
        }
        assert!(p.moments().second_moment().is_finite());
        assert!(!p.moments().is_degenerate());
        assert_eq!(p.classify(10.2, 0.01), Status::InOrdinary);
    }

    #[test]
    fn test_largest_accepted_magnitude() {
        let mut p = detector(2);
        p.ingest(1e154);
        p.ingest(-1e154);

        assert_eq!(p.count(), 2);
        assert!(p.moments().second_moment().is_finite());
        assert!(p.std_dev().is_finite());
    }

    #[test]
    fn test_weight_non_finite() {
        let mut p = detector(3);
        assert_eq!(p.weight(f64::NAN), 0.0);

        for v in [1.0, 2.0, 3.0] {
            p.ingest(v);
        }
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(p.weight(v), 0.9, "weight({}) should be alpha0", v);
        }
    }

    #[test]
    fn test_classify_agrees_with_is_anomaly() {
        let mut p = detector(5);
        for v in [3.0, 4.0, 3.5, 4.5, 4.0] {
            p.ingest(v);
        }

        for v in [4.0, 5.0, 6.0, 7.0, 9.0, -2.0] {
            for threshold in [0.0, 0.001, 0.05, 0.2, f64::NAN] {
                let expected = if p.moments().is_anomaly(threshold, v) {
                    Status::Outlier
                } else {
                    Status::InOrdinary
                };
                assert_eq!(p.classify(v, threshold), expected);
            }
        }
    }

    #[test]
    fn test_history_bounded() {
        let mut p = detector(3);
        for i in 0..10 {
            p.ingest(i as f64);
        }

        assert_eq!(p.len(), 3);
        assert_eq!(p.count(), 10);
        assert_eq!(p.history().to_vec(), vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_with_value_is_functional() {
        let mut p = detector(2);
        p.ingest(4.0);

        let next = p.with_value(6.0);

        assert_eq!(p.len(), 1);
        assert_eq!(p.mean(), 4.0);
        assert_eq!(next.len(), 2);
        assert_eq!(next.mean(), 5.0);

        p.ingest(6.0);
        assert_eq!(p.moments(), next.moments());
    }

    #[test]
    fn test_outlier_resists_baseline_shift() {
        // Noisy baseline around 10, then a single spike
        let mut p = detector(10);
        for i in 0..50 {
            p.ingest(10.0 + if i % 2 == 0 { 0.5 } else { -0.5 });
        }
        let before = p.mean();

        assert_eq!(p.observe(100.0, 0.001), Status::Outlier);

        // alpha ~= alpha0 for the spike, so the mean moves by ~10% of the gap
        assert!((p.mean() - before) < 0.11 * (100.0 - before));
        assert_eq!(p.classify(10.0, 0.001), Status::InOrdinary);
    }

    #[test]
    fn test_observe_matches_classify_then_ingest() {
        let data = [3.0, 4.0, 3.5, 4.2, 3.8, 12.0, 3.9];
        let mut a = detector(4);
        let mut b = detector(4);

        for &v in &data {
            let expected = a.classify(v, 0.05);
            a.ingest(v);
            assert_eq!(b.observe(v, 0.05), expected);
        }
        assert_eq!(a.moments(), b.moments());
    }

    #[test]
    fn test_analyze() {
        let mut p = detector(3);
        let statuses = p.analyze(&[1.0, 1.0, 1.0, 1.0, 50.0], 0.01);

        assert_eq!(
            statuses,
            vec![
                Status::InTraining,
                Status::InTraining,
                Status::InTraining,
                Status::InOrdinary,
                Status::Outlier,
            ]
        );
        assert_eq!(p.count(), 5);
    }

    #[test]
    fn test_analyze_empty() {
        let mut p = detector(3);
        assert!(p.analyze(&[], 0.01).is_empty());
        assert!(p.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut p = detector(2);
        for v in [1.0, 2.0, 3.0] {
            p.ingest(v);
        }

        p.clear();

        assert!(p.is_empty());
        assert_eq!(p.count(), 0);
        assert_eq!(*p.moments(), Moments::new());
        assert_eq!(p.classify(1.0, 0.01), Status::InTraining);
        assert_eq!(p.config().training_period(), 2);
    }

    #[test]
    fn test_detector_trait() {
        fn drive<D: Detector>(d: &mut D, data: &[f64]) -> usize {
            data.iter()
                .filter(|&&v| d.observe(v, 0.01).is_outlier())
                .count()
        }

        let mut p = detector(3);
        let outliers = drive(&mut p, &[2.0, 2.0, 2.0, 2.0, 80.0]);

        assert_eq!(outliers, 1);
        assert_eq!(Detector::count(&p), 5);
        assert!(Detector::is_trained(&p));
        assert!(p.size_bytes() >= 3 * core::mem::size_of::<f64>());

        Detector::clear(&mut p);
        assert!(!Detector::is_trained(&p));
    }
}
