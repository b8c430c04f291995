//! Bounded min-heap backing the top-k tracker
//!
//! An array-backed binary min-heap of at most `capacity` nodes ordered by
//! count ascending, paired with an item → slot index for O(1) membership
//! lookups. The index is re-recorded on every swap, so it stays consistent
//! with heap positions through insert, removal, and reordering.

use core::hash::Hash;
use std::collections::HashMap;

/// One tracked top-k candidate
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) count: u32,
}

/// Min-heap of tracked candidates with an item → slot index
///
/// Invariants: size never exceeds `capacity`; an item occupies at most one
/// slot; the root holds the minimum count among tracked items.
#[derive(Clone, Debug)]
pub(crate) struct MinHeap<T: Hash + Eq + Clone> {
    capacity: usize,
    nodes: Vec<Node<T>>,
    index: HashMap<T, usize>,
}

impl<T: Hash + Eq + Clone> MinHeap<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            nodes: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.nodes.len() >= self.capacity
    }

    /// Slot of an item, if tracked. O(1).
    pub(crate) fn find(&self, item: &T) -> Option<usize> {
        self.index.get(item).copied()
    }

    pub(crate) fn count_at(&self, slot: usize) -> u32 {
        self.nodes[slot].count
    }

    /// Current admission threshold: the root's count once the heap is full,
    /// 0 while below capacity (admit everything until full).
    pub(crate) fn min(&self) -> u32 {
        if self.nodes.len() < self.capacity {
            0
        } else {
            self.nodes[0].count
        }
    }

    /// Update the count at `slot` and restore heap order, sifting in the
    /// direction the new value dictates. O(log capacity).
    pub(crate) fn fix(&mut self, slot: usize, count: u32) {
        let old = self.nodes[slot].count;
        self.nodes[slot].count = count;
        if count < old {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
    }

    /// Admit a new item. Below capacity this inserts a fresh slot; at
    /// capacity the root is replaced and its item reported as evicted.
    /// The caller is responsible for only admitting at capacity when the
    /// candidate beats the current minimum.
    pub(crate) fn admit(&mut self, item: T, count: u32) -> Option<T> {
        if self.nodes.len() < self.capacity {
            let slot = self.nodes.len();
            self.index.insert(item.clone(), slot);
            self.nodes.push(Node { item, count });
            self.sift_up(slot);
            None
        } else {
            let evicted = self.nodes[0].item.clone();
            self.index.remove(&evicted);
            self.index.insert(item.clone(), 0);
            self.nodes[0] = Node { item, count };
            self.sift_down(0);
            Some(evicted)
        }
    }

    /// All tracked entries, highest count first.
    pub(crate) fn sorted(&self) -> Vec<(T, u32)> {
        let mut items: Vec<_> = self
            .nodes
            .iter()
            .map(|n| (n.item.clone(), n.count))
            .collect();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        items
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
    }

    pub(crate) fn size_bytes(&self) -> usize {
        self.nodes.capacity() * core::mem::size_of::<Node<T>>()
            + self.index.capacity()
                * (core::mem::size_of::<T>() + core::mem::size_of::<usize>())
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.nodes.swap(a, b);
        self.index.insert(self.nodes[a].item.clone(), a);
        self.index.insert(self.nodes[b].item.clone(), b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.nodes[slot].count >= self.nodes[parent].count {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < self.nodes.len()
                && self.nodes[left].count < self.nodes[smallest].count
            {
                smallest = left;
            }
            if right < self.nodes.len()
                && self.nodes[right].count < self.nodes[smallest].count
            {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}
