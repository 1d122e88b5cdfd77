//! Indexed min-priority queue used as the A* fringe.
//!
//! Entries live in a binary heap keyed by `(priority, seq)`. A side table
//! maps every key to its heap slot, so a key is present at most once and
//! its priority can be changed in place.
//!
//! `seq` is a per-queue counter stamped on every insert *and* every update:
//! among equal priorities, the entry inserted or last updated earliest is
//! extracted first.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Entry<K> {
    key: K,
    priority: f64,
    seq: u64,
}

impl<K> Entry<K> {
    #[inline]
    fn cmp_rank(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue with decrease-key.
#[derive(Debug, Clone)]
pub struct Fringe<K> {
    heap: Vec<Entry<K>>,
    slots: HashMap<K, usize>,
    seq: u64,
}

impl<K: Copy + Eq + Hash> Fringe<K> {
    /// Create an empty fringe.
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            slots: HashMap::new(),
            seq: 0,
        }
    }

    /// Insert `key` with `priority`, or replace its priority if it is
    /// already queued. Never creates a duplicate entry.
    pub fn insert_or_update(&mut self, key: K, priority: f64) {
        let seq = self.seq;
        self.seq += 1;
        match self.slots.get(&key) {
            Some(&i) => {
                self.heap[i].priority = priority;
                self.heap[i].seq = seq;
                let i = self.sift_up(i);
                self.sift_down(i);
            }
            None => {
                let i = self.heap.len();
                self.heap.push(Entry { key, priority, seq });
                self.slots.insert(key, i);
                self.sift_up(i);
            }
        }
    }

    /// Remove and return the entry with the smallest priority, or `None`
    /// when the fringe is empty.
    pub fn extract_min(&mut self) -> Option<(K, f64)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.slots.remove(&entry.key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.key, entry.priority))
    }

    /// Whether `key` is currently queued.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Current priority of `key`, if queued.
    pub fn priority(&self, key: &K) -> Option<f64> {
        self.slots.get(key).map(|&i| self.heap[i].priority)
    }

    /// Number of queued entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the fringe is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    // -----------------------------------------------------------------------
    // Heap maintenance
    // -----------------------------------------------------------------------

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].key, a);
        self.slots.insert(self.heap[b].key, b);
    }

    /// Move the entry at `i` towards the root. Returns its final slot.
    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].cmp_rank(&self.heap[parent]) != Ordering::Less {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < len && self.heap[left].cmp_rank(&self.heap[smallest]) == Ordering::Less {
                smallest = left;
            }
            if right < len && self.heap[right].cmp_rank(&self.heap[smallest]) == Ordering::Less
            {
                smallest = right;
            }
            if smallest == i {
                return;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<K: Copy + Eq + Hash> Default for Fringe<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_priority_order() {
        let mut q = Fringe::new();
        q.insert_or_update('a', 3.0);
        q.insert_or_update('b', 1.0);
        q.insert_or_update('c', 2.0);

        assert_eq!(q.extract_min(), Some(('b', 1.0)));
        assert_eq!(q.extract_min(), Some(('c', 2.0)));
        assert_eq!(q.extract_min(), Some(('a', 3.0)));
        assert_eq!(q.extract_min(), None);
    }

    #[test]
    fn equal_priorities_come_out_fifo() {
        let mut q = Fringe::new();
        for k in 0..6 {
            q.insert_or_update(k, 1.0);
        }
        let order: Vec<_> = std::iter::from_fn(|| q.extract_min().map(|(k, _)| k)).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn update_replaces_instead_of_duplicating() {
        let mut q = Fringe::new();
        q.insert_or_update(1, 5.0);
        q.insert_or_update(2, 4.0);
        q.insert_or_update(1, 2.0);

        assert_eq!(q.len(), 2);
        assert_eq!(q.priority(&1), Some(2.0));
        assert_eq!(q.extract_min(), Some((1, 2.0)));
        assert!(!q.contains(&1));
        assert_eq!(q.extract_min(), Some((2, 4.0)));
        assert!(q.is_empty());
    }

    #[test]
    fn updated_entry_goes_behind_its_ties() {
        let mut q = Fringe::new();
        q.insert_or_update('a', 7.0);
        q.insert_or_update('b', 3.0);
        q.insert_or_update('a', 3.0);
        assert_eq!(q.extract_min(), Some(('b', 3.0)));
        assert_eq!(q.extract_min(), Some(('a', 3.0)));
    }

    #[test]
    fn increase_key_sinks() {
        let mut q = Fringe::new();
        q.insert_or_update('a', 1.0);
        q.insert_or_update('b', 2.0);
        q.insert_or_update('c', 3.0);
        q.insert_or_update('a', 10.0);
        assert_eq!(q.extract_min(), Some(('b', 2.0)));
        assert_eq!(q.extract_min(), Some(('c', 3.0)));
        assert_eq!(q.extract_min(), Some(('a', 10.0)));
    }

    #[test]
    fn contains_tracks_membership() {
        let mut q = Fringe::new();
        assert!(!q.contains(&9));
        q.insert_or_update(9, 0.5);
        assert!(q.contains(&9));
        q.extract_min();
        assert!(!q.contains(&9));
        assert_eq!(q.priority(&9), None);
    }

    #[test]
    fn matches_sorted_order_under_mixed_updates() {
        use rand::{RngExt, SeedableRng};

        let mut rng = rand::rngs::StdRng::seed_from_u64(17);
        let mut q = Fringe::new();
        let mut expected = HashMap::new();
        for _ in 0..500 {
            let key = rng.random_range(0..40u32);
            let prio = f64::from(rng.random_range(0..100u32)) / 4.0;
            q.insert_or_update(key, prio);
            expected.insert(key, prio);
        }
        let mut want: Vec<f64> = expected.values().copied().collect();
        want.sort_by(f64::total_cmp);
        let got: Vec<f64> = std::iter::from_fn(|| q.extract_min().map(|(_, p)| p)).collect();
        assert_eq!(got, want);
    }
}
