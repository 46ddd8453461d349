//! Ring buffer backing the detector history

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Fixed-capacity FIFO window over `f64` observations
///
/// Values are stored in a single buffer that grows up to `capacity` and is
/// then overwritten round-robin. `head` points at the oldest value once the
/// buffer is full and stays at 0 before that.
#[derive(Clone, Debug)]
pub struct RingWindow {
    /// Maximum number of retained values
    capacity: usize,
    /// Backing storage, at most `capacity` long
    buffer: Vec<f64>,
    /// Index of the oldest value
    head: usize,
}

impl RingWindow {
    /// Create an empty window holding at most `capacity` values
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");

        Self {
            capacity,
            buffer: Vec::with_capacity(capacity),
            head: 0,
        }
    }

    /// Append a value, returning the evicted oldest value if the window was full
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.buffer.len() < self.capacity {
            self.buffer.push(value);
            return None;
        }

        let evicted = core::mem::replace(&mut self.buffer[self.head], value);
        self.head = (self.head + 1) % self.capacity;
        Some(evicted)
    }

    /// Number of values currently held
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the window holds no values
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Check if the window is at capacity
    pub fn is_full(&self) -> bool {
        self.buffer.len() >= self.capacity
    }

    /// Maximum number of values held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest value held
    pub fn first(&self) -> Option<f64> {
        self.buffer.get(self.head).copied()
    }

    /// Most recently pushed value
    pub fn last(&self) -> Option<f64> {
        if self.buffer.is_empty() {
            return None;
        }
        let idx = (self.head + self.buffer.len() - 1) % self.buffer.len();
        Some(self.buffer[idx])
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> Iter<'_> {
        let (newer, older) = self.buffer.split_at(self.head);
        Iter {
            inner: older.iter().chain(newer.iter()),
        }
    }

    /// Copy the values out, oldest first
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Drop all values, keeping the capacity
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.head = 0;
    }
}

/// Oldest-to-newest iterator over a [`RingWindow`]
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: core::iter::Chain<core::slice::Iter<'a, f64>, core::slice::Iter<'a, f64>>,
}

impl Iterator for Iter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<f64> {
        self.inner.next_back().copied()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a RingWindow {
    type Item = f64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
