//! Bucketed min-priority queue with decrease-key.

use std::collections::{BTreeMap, VecDeque};

use super::key::F64Key;

/// Min-priority queue grouping values into buckets of equal priority.
///
/// Values with the same priority are popped in insertion order. `update`
/// moves a value between buckets, which is how the corridor search lowers
/// the priority of an already-open corridor.
#[derive(Debug, Clone)]
pub struct PriorityQueue<V> {
    buckets: BTreeMap<F64Key, VecDeque<V>>,
    len: usize,
}

impl<V: PartialEq> PriorityQueue<V> {
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, priority: f64, value: V) {
        self.buckets
            .entry(F64Key(priority))
            .or_default()
            .push_back(value);
        self.len += 1;
    }

    /// Priority and value at the front of the queue.
    pub fn front(&self) -> Option<(f64, &V)> {
        self.buckets
            .iter()
            .next()
            .and_then(|(key, bucket)| bucket.front().map(|v| (key.value(), v)))
    }

    pub fn pop(&mut self) -> Option<(f64, V)> {
        let mut entry = self.buckets.first_entry()?;
        let priority = entry.key().value();
        let value = entry.get_mut().pop_front();
        if entry.get().is_empty() {
            entry.remove();
        }
        if value.is_some() {
            self.len -= 1;
        }
        value.map(|v| (priority, v))
    }

    /// Moves `value` from the `old` bucket to the `new` one.
    ///
    /// Returns false, and leaves the queue untouched, if the value was not
    /// queued under `old`.
    pub fn update(&mut self, old: f64, new: f64, value: V) -> bool {
        let key = F64Key(old);
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|v| *v == value) else {
            return false;
        };
        bucket.remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        self.len -= 1;
        self.push(new, value);
        true
    }
}

impl<V: PartialEq> Default for PriorityQueue<V> {
    fn default() -> Self {
        Self::new()
    }
}
