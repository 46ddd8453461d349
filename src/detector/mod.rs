//! Streaming outlier detectors
//!
//! # Detectors
//!
//! - [`Pewma`]: Probabilistic EWMA (Carter & Streilein, 2012), an EWMA
//!   whose blend weight adapts to how anomalous each new value looks
//!
//! # Example
//!
//! ```
//! use pewma::detector::Pewma;
//! use pewma::{Config, Status};
//!
//! let mut detector = Pewma::new(Config::new(10, 0.95, 0.5).unwrap());
//!
//! let readings = [20.1, 19.8, 20.3, 20.0, 19.9, 20.2, 20.1, 19.7, 20.4, 20.0, 20.1, 35.0];
//! let statuses = detector.analyze(&readings, 0.001);
//!
//! assert_eq!(statuses[0], Status::InTraining);
//! assert_eq!(statuses[10], Status::InOrdinary);
//! assert_eq!(statuses[11], Status::Outlier);
//! ```

mod pewma;

pub use pewma::Pewma;
