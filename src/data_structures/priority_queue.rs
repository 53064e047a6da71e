use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// A min-ordered binary heap of `(priority, item)` entries
///
/// There is no decrease-key: a better priority for an item is pushed as a new
/// entry, and the superseded one is skipped later by [`MinHeap::pop_fresh`].
/// Entries with equal priority pop in ascending item order.
#[derive(Debug, Clone)]
pub struct MinHeap<V, P>
where
    V: Clone + Eq + Debug + Ord,
    P: Copy + Debug + Ord,
{
    /// The underlying binary heap
    heap: BinaryHeap<Reverse<(P, V)>>,
}

impl<V, P> Default for MinHeap<V, P>
where
    V: Clone + Eq + Debug + Ord,
    P: Copy + Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> MinHeap<V, P>
where
    V: Clone + Eq + Debug + Ord,
    P: Copy + Debug + Ord,
{
    /// Creates a new empty priority queue
    pub fn new() -> Self {
        MinHeap {
            heap: BinaryHeap::new(),
        }
    }

    /// Returns true if the priority queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of entries, stale ones included
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Pushes an entry with the given priority
    pub fn push(&mut self, item: V, priority: P) {
        self.heap.push(Reverse((priority, item)));
    }

    /// Removes the entry with the lowest priority
    pub fn pop(&mut self) -> Option<(V, P)> {
        self.heap.pop().map(|Reverse((priority, item))| (item, priority))
    }

    /// Pops entries until one is found for which `is_stale` is false
    ///
    /// Returns that entry, if any, together with the number of stale entries discarded.
    pub fn pop_fresh<F>(&mut self, mut is_stale: F) -> (Option<(V, P)>, usize)
    where
        F: FnMut(&V) -> bool,
    {
        let mut discarded = 0;
        while let Some((item, priority)) = self.pop() {
            if is_stale(&item) {
                discarded += 1;
                continue;
            }
            return (Some((item, priority)), discarded);
        }
        (None, discarded)
    }

    /// Returns all entries in ascending `(priority, item)` order
    pub fn sorted_entries(&self) -> Vec<(P, V)> {
        let mut entries: Vec<(P, V)> = self
            .heap
            .iter()
            .map(|Reverse((priority, item))| (*priority, item.clone()))
            .collect();
        entries.sort();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_ascending_priority() {
        let mut heap = MinHeap::new();
        heap.push("c", 3);
        heap.push("a", 1);
        heap.push("b", 2);

        assert_eq!(heap.pop(), Some(("a", 1)));
        assert_eq!(heap.pop(), Some(("b", 2)));
        assert_eq!(heap.pop(), Some(("c", 3)));
        assert!(heap.pop().is_none());
    }

    #[test]
    fn equal_priority_breaks_by_item() {
        let mut heap = MinHeap::new();
        heap.push("z", 4);
        heap.push("m", 4);
        assert_eq!(heap.pop(), Some(("m", 4)));
    }

    #[test]
    fn pop_fresh_skips_stale_entries() {
        let mut heap = MinHeap::new();
        heap.push("x", 1);
        heap.push("x", 5);
        heap.push("y", 3);

        let (entry, discarded) = heap.pop_fresh(|item| *item == "x");
        assert_eq!(entry, Some(("y", 3)));
        assert_eq!(discarded, 1);
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn pop_fresh_on_exhausted_heap() {
        let mut heap = MinHeap::new();
        heap.push("x", 1);
        let (entry, discarded) = heap.pop_fresh(|_| true);
        assert_eq!(entry, None);
        assert_eq!(discarded, 1);
        assert!(heap.is_empty());
    }

    #[test]
    fn sorted_entries_keeps_duplicates() {
        let mut heap = MinHeap::new();
        heap.push("b", 6);
        heap.push("b", 2);
        heap.push("a", 9);
        assert_eq!(heap.sorted_entries(), vec![(2, "b"), (6, "b"), (9, "a")]);
        assert_eq!(heap.len(), 3);
    }
}
