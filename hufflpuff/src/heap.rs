//! Array backed binary min-heap, used to pick the two lightest trees while building the huffman
//! tree.
//!
//! The queue is not synchronized. All mutating operations take `&mut self`, sharing a queue
//! between threads requires an external lock.

use crate::DEFAULT_HEAP_CAPACITY;

#[derive(Debug, Clone)]
struct Entry<T> {
    priority: u64,
    element: T,
}

/// Min-first priority queue keyed by an integer priority (the weight).
///
/// The order between elements with equal priority is unspecified.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        PriorityQueue::new()
    }
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        PriorityQueue::with_capacity(DEFAULT_HEAP_CAPACITY)
    }

    /// To avoid repeated growing when adding many elements, pass the expected number of elements.
    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// number of elements in the queue
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn insert(&mut self, element: T, priority: u64) {
        if self.len() == self.capacity() {
            self.grow();
        }
        self.entries.push(Entry { priority, element });
        self.sift_up(self.entries.len() - 1);
    }

    /// Removes and returns the element with the lowest priority. Returns None if the queue is
    /// empty.
    pub fn remove_min(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let min = self.entries.pop()?;
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(min.element)
    }

    /// doubles the capacity
    fn grow(&mut self) {
        let additional = self.capacity().max(1);
        self.entries.reserve_exact(additional);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos != 0 {
            let parent = parent(pos);
            if self.entries[pos].priority >= self.entries[parent].priority {
                break;
            }
            self.entries.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.entries.len();
        loop {
            let left = left_child(pos);
            if left >= len {
                break;
            }
            let right = right_child(pos);
            let right_is_smaller =
                right < len && self.entries[right].priority < self.entries[left].priority;
            let smallest = if right_is_smaller { right } else { left };
            if self.entries[pos].priority <= self.entries[smallest].priority {
                break;
            }
            self.entries.swap(pos, smallest);
            pos = smallest;
        }
    }

    #[cfg(test)]
    fn is_valid_min_heap(&self) -> bool {
        (1..self.entries.len())
            .all(|pos| self.entries[parent(pos)].priority <= self.entries[pos].priority)
    }
}

#[inline]
fn left_child(pos: usize) -> usize {
    2 * pos + 1
}

#[inline]
fn right_child(pos: usize) -> usize {
    2 * pos + 2
}

/// must not be called for the root
#[inline]
fn parent(pos: usize) -> usize {
    debug_assert!(pos != 0);
    (pos - 1) / 2
}

impl<T> FromIterator<(T, u64)> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = (T, u64)>>(iter: I) -> Self {
        let mut queue = PriorityQueue::new();
        queue.extend(iter);
        queue
    }
}

impl<T> Extend<(T, u64)> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = (T, u64)>>(&mut self, iter: I) {
        for (element, priority) in iter {
            self.insert(element, priority);
        }
    }
}

#[test]
fn test_index_arithmetic() {
    assert_eq!(left_child(0), 1);
    assert_eq!(right_child(0), 2);
    assert_eq!(left_child(3), 7);
    assert_eq!(right_child(3), 8);
    assert_eq!(parent(1), 0);
    assert_eq!(parent(2), 0);
    assert_eq!(parent(7), 3);
    assert_eq!(parent(8), 3);
}
