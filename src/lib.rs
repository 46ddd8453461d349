//! # PEWMA
//!
//! Probabilistic exponentially weighted moving average for streaming
//! outlier detection.
//!
//! PEWMA tracks the running mean and standard deviation of a scalar
//! stream and flags each new value as still training, ordinary, or an
//! outlier. Unlike a plain EWMA, the weight given to every observation
//! depends on how probable it looks under the current estimate, so
//! outliers are automatically down-weighted instead of contaminating the
//! baseline.
//!
//! ## Features
//!
//! - **Adaptive weighting**: blend weight driven by the Gaussian density of each value
//! - **Warm-up**: cumulative averaging over a configurable training period
//! - **Bounded memory**: ring-buffer history capped at the training period
//! - **Total operations**: no NaN ever leaks out of degenerate variance
//!
//! ## Quick Start
//!
//! ```rust
//! use pewma::prelude::*;
//!
//! let config = Config::new(5, 0.9, 0.3).unwrap();
//! let mut detector = Pewma::new(config);
//!
//! for value in [1.0, 1.1, 0.9, 1.0, 1.05] {
//!     detector.ingest(value);
//! }
//!
//! // Judge first, then learn from the value
//! assert_eq!(detector.classify(1.0, 0.01), Status::InOrdinary);
//! assert_eq!(detector.observe(40.0, 0.01), Status::Outlier);
//! ```
//!
//! ## Generic Streams
//!
//! Detectors implement the [`Detector`](traits::Detector) trait, so stream
//! plumbing can be written once:
//!
//! ```rust
//! use pewma::traits::Detector;
//! use pewma::{Config, Pewma};
//!
//! fn outliers<D: Detector>(detector: &mut D, data: &[f64], threshold: f64) -> usize {
//!     data.iter()
//!         .filter(|&&v| detector.observe(v, threshold).is_outlier())
//!         .count()
//! }
//!
//! let mut detector = Pewma::new(Config::new(3, 0.9, 0.3).unwrap());
//! assert_eq!(outliers(&mut detector, &[5.0, 5.0, 5.0, 5.0, 90.0], 0.01), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support; without it the crate is
//!   `no_std` + `alloc` and uses `libm` for math
//! - `serde`: Enable serialization of [`Config`], [`Status`] and
//!   [`Moments`](statistics::Moments)
//!
//! ## Logging
//!
//! Events are emitted through [`tracing`](https://docs.rs/tracing); install
//! any subscriber to see config rejections, dropped non-finite values,
//! training completion (debug) and individual outliers (trace).

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod config;
pub mod detector;
pub mod math;
pub mod statistics;
pub mod traits;
pub mod window;

pub mod prelude {
    pub use crate::config::{Config, ConfigError};
    pub use crate::detector::Pewma;
    pub use crate::statistics::Moments;
    pub use crate::traits::*;
}

pub use config::{Config, ConfigError};
pub use detector::Pewma;
pub use traits::Status;
