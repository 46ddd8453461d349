//! Exponentially weighted moment estimates
//!
//! This module holds the running first and second moment of a stream,
//! blended with a caller-chosen weight on every observation, and the
//! Gaussian density used to score new values against them.
//!
//! # Example
//!
//! ```
//! use pewma::statistics::Moments;
//!
//! // A weight of 1 - 1/(n+1) reproduces the cumulative mean
//! let mut moments = Moments::new();
//! for (n, value) in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().enumerate() {
//!     moments = moments.updated(1.0 - 1.0 / (n as f64 + 1.0), value);
//! }
//!
//! assert!((moments.mean() - 5.0).abs() < 1e-9);
//! assert!((moments.std_dev() - 2.0).abs() < 1e-9);
//! ```

mod moments;

pub use moments::Moments;
