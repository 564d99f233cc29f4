//! Multi-value priority queue used as the search's open boundary.

use std::collections::{BTreeMap, VecDeque};

/// Priority queue that maps each distinct key to a FIFO queue of values.
///
/// [`PriorityQueue::dequeue`] always yields the oldest value enqueued
/// under the minimum key, so entries sharing a key leave in insertion
/// order. A key's bucket is removed as soon as its last value is taken;
/// no empty buckets linger.
#[derive(Clone, Debug)]
pub struct PriorityQueue<K, V> {
    buckets: BTreeMap<K, VecDeque<V>>,
    len: usize,
}

impl<K: Ord, V> PriorityQueue<K, V> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
            len: 0,
        }
    }

    /// Inserts a value under the provided key.
    pub fn add(&mut self, key: K, value: V) {
        self.buckets.entry(key).or_default().push_back(value);
        self.len += 1;
    }

    /// Returns the minimum key and its oldest value without removing them.
    #[must_use]
    pub fn peek(&self) -> Option<(&K, &V)> {
        let (key, bucket) = self.buckets.first_key_value()?;
        bucket.front().map(|value| (key, value))
    }

    /// Removes and returns the oldest value under the minimum key.
    pub fn dequeue(&mut self) -> Option<V> {
        let mut entry = self.buckets.first_entry()?;
        let value = entry.get_mut().pop_front();
        if entry.get().is_empty() {
            let _ = entry.remove();
        }
        if value.is_some() {
            self.len -= 1;
        }
        value
    }

    /// Total number of values across all keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Reports whether the queue holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<K: Ord, V> Default for PriorityQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
