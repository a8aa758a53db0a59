//! `MinQueue` — decrease-key binary min-heap.
//!
//! # Layout
//!
//! The heap is a complete binary tree stored level by level in a `Vec`:
//! the children of slot `i` are `2i + 1` and `2i + 2`, its parent is
//! `(i - 1) / 2`, and the last leaf is always `heap.len() - 1`.  A companion
//! map `key → slot` turns the "is this key queued?" check of `decrease_key`
//! into an O(1) lookup and lets an improved priority sift up from the right
//! slot in O(log n).
//!
//! Every slot move goes through [`MinQueue::swap`], which keeps the map in
//! step with the array.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Min-priority queue over `Copy` keys with `f64` priorities.
#[derive(Clone, Debug)]
pub struct MinQueue<K> {
    heap: Vec<(K, f64)>,
    slot: FxHashMap<K, usize>,
}

impl<K: Copy + Eq + Hash> MinQueue<K> {
    pub fn new() -> Self {
        Self { heap: Vec::new(), slot: FxHashMap::default() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            slot: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.slot.clear();
    }

    /// `true` if `key` is currently queued.
    pub fn contains(&self, key: K) -> bool {
        self.slot.contains_key(&key)
    }

    /// Current priority of a queued key.
    pub fn priority(&self, key: K) -> Option<f64> {
        self.slot.get(&key).map(|&i| self.heap[i].1)
    }

    /// The minimum entry, without removing it.
    pub fn peek(&self) -> Option<(K, f64)> {
        self.heap.first().copied()
    }

    /// Insert `key` if it is not queued, or lower its priority if `priority`
    /// improves on the queued one.
    ///
    /// Returns `false` (and changes nothing) when the key is queued with a
    /// priority less than or equal to `priority`.
    pub fn decrease_key(&mut self, key: K, priority: f64) -> bool {
        debug_assert!(!priority.is_nan(), "NaN priority");
        match self.slot.get(&key) {
            Some(&i) => {
                if priority < self.heap[i].1 {
                    self.heap[i].1 = priority;
                    self.sift_up(i);
                    true
                } else {
                    false
                }
            }
            None => {
                let i = self.heap.len();
                self.heap.push((key, priority));
                self.slot.insert(key, i);
                self.sift_up(i);
                true
            }
        }
    }

    /// Remove and return the minimum entry.  The key is forgotten: a later
    /// `decrease_key` on it inserts afresh.
    pub fn pop(&mut self) -> Option<(K, f64)> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let (key, priority) = self.heap.pop()?;
        self.slot.remove(&key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((key, priority))
    }

    /// Remove and return the minimum-priority key.
    #[inline]
    pub fn extract_min(&mut self) -> Option<K> {
        self.pop().map(|(key, _)| key)
    }

    // ── Heap maintenance ──────────────────────────────────────────────────

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].1 < self.heap[parent].1 {
                self.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut min = i;
            if left < n && self.heap[left].1 < self.heap[min].1 {
                min = left;
            }
            if right < n && self.heap[right].1 < self.heap[min].1 {
                min = right;
            }
            if min == i {
                break;
            }
            self.swap(i, min);
            i = min;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.slot.insert(self.heap[a].0, a);
        self.slot.insert(self.heap[b].0, b);
    }
}

impl<K: Copy + Eq + Hash> Default for MinQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
