// SPDX-License-Identifier: MPL-2.0
//! Bounded event storage. The oldest entry is evicted once capacity is reached.

use crate::app::config::{
    DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, MAX_DIAGNOSTICS_BUFFER_CAPACITY,
    MIN_DIAGNOSTICS_BUFFER_CAPACITY,
};
use std::collections::VecDeque;

/// Number of events kept in memory, clamped to the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(
            MIN_DIAGNOSTICS_BUFFER_CAPACITY,
            MAX_DIAGNOSTICS_BUFFER_CAPACITY,
        ))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
    }
}

/// Ring buffer in chronological order (oldest first).
///
/// ```
/// use sales_lens::diagnostics::CircularBuffer;
///
/// let mut buffer = CircularBuffer::with_raw_capacity(2);
/// buffer.push("upload");
/// buffer.push("analyze");
/// buffer.push("complete");
///
/// let items: Vec<_> = buffer.iter().copied().collect();
/// assert_eq!(items, vec!["analyze", "complete"]);
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Bypasses the [`BufferCapacity`] bounds; at least one slot is kept.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_clamped_to_configured_bounds() {
        assert_eq!(BufferCapacity::new(0).value(), MIN_DIAGNOSTICS_BUFFER_CAPACITY);
        assert_eq!(
            BufferCapacity::new(usize::MAX).value(),
            MAX_DIAGNOSTICS_BUFFER_CAPACITY
        );
        assert_eq!(BufferCapacity::new(250).value(), 250);
        assert_eq!(
            BufferCapacity::default().value(),
            DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY
        );
    }

    #[test]
    fn push_evicts_oldest_when_full() {
        let mut buffer = CircularBuffer::with_raw_capacity(3);
        for i in 1..=5 {
            buffer.push(i);
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn zero_raw_capacity_keeps_one_slot() {
        let mut buffer = CircularBuffer::with_raw_capacity(0);
        buffer.push('a');
        buffer.push('b');
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec!['b']);
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buffer = CircularBuffer::new(BufferCapacity::new(10));
        buffer.push(1);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 10);
    }
}
