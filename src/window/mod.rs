//! Bounded observation history
//!
//! A fixed-capacity FIFO of the most recent observations. Once full, every
//! push evicts the oldest value in place, so the window never reallocates.
//!
//! # Example
//!
//! ```
//! use pewma::window::RingWindow;
//!
//! let mut window = RingWindow::new(3);
//! for value in [1.0, 2.0, 3.0, 4.0] {
//!     window.push(value);
//! }
//!
//! assert_eq!(window.to_vec(), vec![2.0, 3.0, 4.0]);
//! ```

mod ring;

pub use ring::{Iter, RingWindow};
