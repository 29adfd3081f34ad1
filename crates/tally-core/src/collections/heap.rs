//! Array-backed binary max-heap with a caller-supplied comparator
//!
//! The comparator returns `Ordering::Greater` when `a` should rank above `b`.
//! Ties come out in whatever order the heap leaves them; callers needing a
//! deterministic tie-break must encode it in the comparator.

use std::cmp::Ordering;

pub struct PrioritySelector<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    heap: Vec<T>,
    cmp: F,
}

impl<T, F> PrioritySelector<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(cmp: F) -> Self {
        Self {
            heap: Vec::new(),
            cmp,
        }
    }

    pub fn with_capacity(capacity: usize, cmp: F) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            cmp,
        }
    }

    /// O(log n)
    pub fn insert(&mut self, item: T) {
        self.heap.push(item);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the top item; `None` when empty. O(log n)
    pub fn extract_max(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let max = self.heap.pop();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        max
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Drain into a vector ordered from highest to lowest
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(item) = self.extract_max() {
            out.push(item);
        }
        out
    }

    fn ranks_above(&self, a: usize, b: usize) -> bool {
        (self.cmp)(&self.heap[a], &self.heap[b]) == Ordering::Greater
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.ranks_above(index, parent) {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut largest = index;

            if left < len && self.ranks_above(left, largest) {
                largest = left;
            }
            if right < len && self.ranks_above(right, largest) {
                largest = right;
            }
            if largest == index {
                break;
            }
            self.heap.swap(index, largest);
            index = largest;
        }
    }
}

impl<T: std::fmt::Debug, F> std::fmt::Debug for PrioritySelector<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrioritySelector")
            .field("heap", &self.heap)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_value(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn test_extracts_in_non_increasing_order() {
        let mut heap = PrioritySelector::new(by_value);
        for v in [5, 1, 9, 3, 9, 7, 2, 8, 0, 6] {
            heap.insert(v);
        }

        let mut previous = i32::MAX;
        let mut size = heap.len();
        while let Some(v) = heap.extract_max() {
            assert!(v <= previous);
            previous = v;
            assert_eq!(heap.len(), size - 1);
            size = heap.len();
        }
        assert!(heap.is_empty());
    }

    #[test]
    fn test_extract_from_empty_is_none() {
        let mut heap = PrioritySelector::new(by_value);
        assert_eq!(heap.extract_max(), None);
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut heap = PrioritySelector::new(by_value);
        heap.insert(4);
        heap.insert(11);
        heap.insert(2);

        assert_eq!(heap.peek(), Some(&11));
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn test_comparator_on_float_field() {
        let mut heap = PrioritySelector::new(|a: &(&str, f64), b: &(&str, f64)| a.1.total_cmp(&b.1));
        heap.insert(("rent", 1200.0));
        heap.insert(("coffee", 42.5));
        heap.insert(("groceries", 310.25));

        let order: Vec<_> = heap.into_sorted_vec().into_iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec!["rent", "groceries", "coffee"]);
    }

    #[test]
    fn test_clear() {
        let mut heap = PrioritySelector::new(by_value);
        heap.insert(1);
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.extract_max(), None);
    }
}
