//! Bucket Priority Queue
//!
//! Integer-priority queue with decrease-key, used by the pathfinder. Each
//! bucket is a singly linked list threaded through the items themselves, so
//! the queue owns no per-item storage.
//!
//! # Example
//!
//! ```ignore
//! let mut queue = CellPriorityQueue::new();
//! queue.enqueue(cells, a);
//! queue.enqueue(cells, b);
//! // ... lower b's priority in place ...
//! queue.change_priority(cells, b, old_priority);
//! assert_eq!(queue.dequeue_min(cells), Some(b));
//! ```

use crate::world::{CellId, HexCell};

/// Access to the priority and intrusive list link of queued items.
///
/// The queue never stores priorities; it reads them from the item store each
/// time, so callers update the priority first and then tell the queue.
pub trait PriorityLinks {
    fn search_priority(&self, id: CellId) -> usize;
    fn next_with_same_priority(&self, id: CellId) -> Option<CellId>;
    fn set_next_with_same_priority(&mut self, id: CellId, next: Option<CellId>);
}

impl PriorityLinks for [HexCell] {
    fn search_priority(&self, id: CellId) -> usize {
        self[id].search_priority()
    }

    fn next_with_same_priority(&self, id: CellId) -> Option<CellId> {
        self[id].search.next_with_same_priority
    }

    fn set_next_with_same_priority(&mut self, id: CellId, next: Option<CellId>) {
        self[id].search.next_with_same_priority = next;
    }
}

/// Bucket queue indexed by absolute priority.
///
/// `minimum` only moves forward while dequeuing, and back only when an
/// enqueue lands below it.
#[derive(Debug, Default)]
pub struct CellPriorityQueue {
    buckets: Vec<Option<CellId>>,
    count: usize,
    minimum: usize,
}

impl CellPriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Insert `item` at the head of the bucket for its current priority.
    pub fn enqueue<L: PriorityLinks + ?Sized>(&mut self, links: &mut L, item: CellId) {
        self.count += 1;
        let priority = links.search_priority(item);
        if priority < self.minimum {
            self.minimum = priority;
        }
        if priority >= self.buckets.len() {
            self.buckets.resize(priority + 1, None);
        }
        links.set_next_with_same_priority(item, self.buckets[priority]);
        self.buckets[priority] = Some(item);
    }

    /// Remove and return an item with the lowest priority.
    pub fn dequeue_min<L: PriorityLinks + ?Sized>(&mut self, links: &mut L) -> Option<CellId> {
        if self.count == 0 {
            return None;
        }
        while self.minimum < self.buckets.len() {
            if let Some(item) = self.buckets[self.minimum] {
                self.buckets[self.minimum] = links.next_with_same_priority(item);
                links.set_next_with_same_priority(item, None);
                self.count -= 1;
                return Some(item);
            }
            self.minimum += 1;
        }
        None
    }

    /// Move `item` from the bucket for `old_priority` to the one for its current priority.
    ///
    /// Returns `false` and leaves the queue untouched if `item` was not queued
    /// at `old_priority`.
    pub fn change_priority<L: PriorityLinks + ?Sized>(
        &mut self,
        links: &mut L,
        item: CellId,
        old_priority: usize,
    ) -> bool {
        let Some(head) = self.buckets.get(old_priority).copied().flatten() else {
            return false;
        };

        if head == item {
            self.buckets[old_priority] = links.next_with_same_priority(item);
        } else {
            let mut previous = head;
            loop {
                match links.next_with_same_priority(previous) {
                    Some(next) if next == item => break,
                    Some(next) => previous = next,
                    None => return false,
                }
            }
            let after = links.next_with_same_priority(item);
            links.set_next_with_same_priority(previous, after);
        }

        self.count -= 1;
        self.enqueue(links, item);
        true
    }

    /// Empty the queue, keeping the bucket allocation.
    pub fn clear(&mut self) {
        self.buckets.fill(None);
        self.count = 0;
        self.minimum = 0;
    }
}
