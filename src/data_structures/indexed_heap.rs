//! An indexed binary min-heap keyed by `i64` distance.
//!
//! Grounded on the shape of the teacher crate's `BinaryHeapWrapper` (a thin
//! wrapper around a heap of `(priority, item)` pairs), but extended with
//! `O(1)` position lookup by item id so that `decrease_key` can locate and
//! sift an existing entry instead of pushing a stale duplicate. The Dijkstra
//! kernel relies on exactly the four operations below; a Fibonacci-heap
//! implementation could stand in behind the same signature.

/// Sentinel meaning "this item currently has no entry in the heap".
const ABSENT: i32 = -1;

/// A 1-based array-backed indexed binary min-heap over item ids `0..capacity`.
#[derive(Debug, Clone)]
pub struct IndexedBinaryHeap {
    /// `heap[i]` is the item id stored at heap slot `i`, 1-based.
    heap: Vec<u32>,
    /// `key[item]` is the current priority of `item`, valid only while
    /// `position[item] != ABSENT`.
    key: Vec<i64>,
    /// `position[item]` is `item`'s 1-based slot in `heap`, or `ABSENT`.
    position: Vec<i32>,
    len: usize,
}

impl IndexedBinaryHeap {
    /// Creates an empty heap over item ids `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        IndexedBinaryHeap {
            heap: vec![0; capacity + 1],
            key: vec![0; capacity],
            position: vec![ABSENT; capacity],
            len: 0,
        }
    }

    /// Empties the heap without shrinking its backing storage.
    pub fn clear(&mut self) {
        for slot in 1..=self.len {
            let item = self.heap[slot] as usize;
            self.position[item] = ABSENT;
        }
        self.len = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn contains(&self, item: u32) -> bool {
        self.position[item as usize] != ABSENT
    }

    /// Inserts `item` with `key`. Requires `item` not already present.
    pub fn insert(&mut self, item: u32, key: i64) {
        debug_assert!(!self.contains(item), "item already present in heap");
        self.len += 1;
        self.heap[self.len] = item;
        self.key[item as usize] = key;
        self.position[item as usize] = self.len as i32;
        self.sift_up(self.len);
    }

    /// Lowers `item`'s key and restores heap order. Requires `item` present
    /// and `new_key <= item`'s current key.
    pub fn decrease_key(&mut self, item: u32, new_key: i64) {
        debug_assert!(self.contains(item), "item not present in heap");
        debug_assert!(new_key <= self.key[item as usize]);
        self.key[item as usize] = new_key;
        let slot = self.position[item as usize] as usize;
        self.sift_up(slot);
    }

    /// Removes and returns the `(item, key)` with minimum key, or `None` if
    /// empty.
    pub fn extract_min(&mut self) -> Option<(u32, i64)> {
        if self.len == 0 {
            return None;
        }
        let top = self.heap[1];
        let top_key = self.key[top as usize];
        self.position[top as usize] = ABSENT;

        let last = self.heap[self.len];
        self.len -= 1;
        if self.len > 0 {
            self.heap[1] = last;
            self.position[last as usize] = 1;
            self.sift_down(1);
        }
        Some((top, top_key))
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 1 {
            let parent = slot / 2;
            if self.key[self.heap[parent] as usize] <= self.key[self.heap[slot] as usize] {
                break;
            }
            self.swap_slots(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = slot * 2;
            let right = left + 1;
            let mut smallest = slot;
            if left <= self.len
                && self.key[self.heap[left] as usize] < self.key[self.heap[smallest] as usize]
            {
                smallest = left;
            }
            if right <= self.len
                && self.key[self.heap[right] as usize] < self.key[self.heap[smallest] as usize]
            {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap_slots(slot, smallest);
            slot = smallest;
        }
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a] as usize] = a as i32;
        self.position[self.heap[b] as usize] = b as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn insert_and_extract_in_order() {
        let mut heap = IndexedBinaryHeap::with_capacity(5);
        heap.insert(0, 10);
        heap.insert(1, 3);
        heap.insert(2, 7);
        assert_eq!(heap.extract_min(), Some((1, 3)));
        assert_eq!(heap.extract_min(), Some((2, 7)));
        assert_eq!(heap.extract_min(), Some((0, 10)));
        assert_eq!(heap.extract_min(), None);
    }

    #[test]
    fn decrease_key_reorders() {
        let mut heap = IndexedBinaryHeap::with_capacity(3);
        heap.insert(0, 10);
        heap.insert(1, 20);
        heap.decrease_key(1, 1);
        assert_eq!(heap.extract_min(), Some((1, 1)));
        assert_eq!(heap.extract_min(), Some((0, 10)));
    }

    #[test]
    fn contains_tracks_membership() {
        let mut heap = IndexedBinaryHeap::with_capacity(2);
        assert!(!heap.contains(0));
        heap.insert(0, 5);
        assert!(heap.contains(0));
        heap.extract_min();
        assert!(!heap.contains(0));
    }

    #[test]
    fn randomised_sequence_is_non_decreasing() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let n = 64usize;
            let mut heap = IndexedBinaryHeap::with_capacity(n);
            let mut keys: Vec<i64> = (0..n).map(|_| rng.gen_range(0..1000)).collect();
            for (item, &k) in keys.iter().enumerate() {
                heap.insert(item as u32, k);
            }
            // Randomly lower some keys before draining.
            for _ in 0..n / 2 {
                let item = rng.gen_range(0..n);
                let lower = rng.gen_range(0..=keys[item]);
                if lower < keys[item] {
                    keys[item] = lower;
                    heap.decrease_key(item as u32, lower);
                }
            }
            let mut last = i64::MIN;
            let mut count = 0;
            while let Some((_, key)) = heap.extract_min() {
                assert!(key >= last);
                last = key;
                count += 1;
            }
            assert_eq!(count, n);
        }
    }
}
