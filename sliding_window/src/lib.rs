//! # Sliding window
//!
//! Bounded, arrival-ordered buffer feeding live charts.
//!
//! Once the buffer holds more than `capacity` readings the oldest ones are
//! evicted from the front, so a snapshot always contains the last
//! `capacity` readings in the order they were pushed.

use std::collections::VecDeque;

/// Number of readings kept by [`SlidingWindow::default`].
pub const DEFAULT_CAPACITY: usize = 60;

/// A single chart point.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSample {
    /// Display label of the moment the value was derived, e.g. `14:03:27`
    pub time: String,
    pub value: f64,
}

impl WindowSample {
    pub fn new(time: impl Into<String>, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlidingWindow<T = WindowSample> {
    capacity: usize,
    readings: VecDeque<T>,
}

impl<T> SlidingWindow<T> {
    /// Creates an empty window holding at most `capacity` readings.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            readings: VecDeque::new(),
        }
    }

    /// Appends a reading and evicts from the front until the window fits.
    pub fn push(&mut self, reading: T) {
        self.readings.push_back(reading);

        while self.readings.len() > self.capacity {
            self.readings.pop_front();
        }
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Most recently pushed reading.
    pub fn latest(&self) -> Option<&T> {
        self.readings.back()
    }

    /// Readings oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.readings.iter()
    }
}

impl<T: Clone> SlidingWindow<T> {
    /// Copy of the current contents, oldest first.
    pub fn snapshot(&self) -> Vec<T> {
        self.readings.iter().cloned().collect()
    }
}

impl<T> Default for SlidingWindow<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> Extend<T> for SlidingWindow<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|this| self.push(this));
    }
}
