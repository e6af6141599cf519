//! Binary-heap priority queue used by the cost-ordered strategies.
use crate::error::QueueError;

/// A min-heap of `(element, priority)` pairs.
///
/// The smallest priority according to `P: Ord` is dequeued first. Elements with equal
/// priorities come out in no particular order.
#[derive(Clone, Debug)]
pub struct PriorityBucket<T, P: Ord> {
    heap: Vec<(T, P)>,
}

impl<T, P: Ord> Default for PriorityBucket<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> PriorityBucket<T, P> {
    pub fn new() -> Self {
        PriorityBucket { heap: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Priority of the element the next `dequeue` would return.
    pub fn peek_priority(&self) -> Option<&P> {
        self.heap.first().map(|(_, priority)| priority)
    }

    /// Appends the pair at the end of the heap and sifts it up.
    pub fn enqueue(&mut self, element: T, priority: P) {
        self.heap.push((element, priority));
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes and returns the element with the smallest priority.
    ///
    /// # Returns
    /// * `Err(QueueError::Empty)` if the bucket holds nothing.
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        if self.heap.is_empty() {
            return Err(QueueError::Empty);
        }

        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let (element, _) = self.heap.pop().ok_or(QueueError::Empty)?;
        self.sift_down(0);
        Ok(element)
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].1 >= self.heap[parent].1 {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let count = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < count && self.heap[left].1 < self.heap[smallest].1 {
                smallest = left;
            }
            if right < count && self.heap[right].1 < self.heap[smallest].1 {
                smallest = right;
            }
            if smallest == index {
                break;
            }

            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_dequeue_empty_fails() {
        let mut bucket: PriorityBucket<&str, u32> = PriorityBucket::new();
        assert_eq!(bucket.dequeue(), Err(QueueError::Empty));
    }

    #[test]
    fn test_dequeue_returns_minimum() {
        let mut bucket = PriorityBucket::new();
        for (element, priority) in [("e", 5), ("a", 1), ("d", 4), ("b", 2), ("c", 3)] {
            bucket.enqueue(element, priority);
        }
        assert_eq!(bucket.len(), 5);
        assert_eq!(bucket.peek_priority(), Some(&1));

        let drained: Vec<&str> = std::iter::from_fn(|| bucket.dequeue().ok()).collect();
        assert_eq!(drained, vec!["a", "b", "c", "d", "e"]);
        assert!(bucket.is_empty());
    }

    #[test]
    fn test_interleaved_operations_keep_heap_order() {
        let mut bucket = PriorityBucket::new();
        bucket.enqueue(10, 10);
        bucket.enqueue(3, 3);
        bucket.enqueue(7, 7);
        assert_eq!(bucket.dequeue(), Ok(3));

        bucket.enqueue(1, 1);
        bucket.enqueue(8, 8);
        assert_eq!(bucket.dequeue(), Ok(1));
        assert_eq!(bucket.dequeue(), Ok(7));

        bucket.enqueue(2, 2);
        assert_eq!(bucket.dequeue(), Ok(2));
        assert_eq!(bucket.dequeue(), Ok(8));
        assert_eq!(bucket.dequeue(), Ok(10));
        assert_eq!(bucket.dequeue(), Err(QueueError::Empty));
    }

    #[test]
    fn test_tuple_priority_breaks_ties_on_second_key() {
        let mut bucket = PriorityBucket::new();
        bucket.enqueue("deep", (4, 3));
        bucket.enqueue("shallow", (4, 1));
        bucket.enqueue("cheap", (2, 9));
        assert_eq!(bucket.dequeue(), Ok("cheap"));
        assert_eq!(bucket.dequeue(), Ok("shallow"));
        assert_eq!(bucket.dequeue(), Ok("deep"));
    }

    #[test]
    fn test_random_operations_match_sorted_model() {
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut bucket = PriorityBucket::new();
            // Kept sorted in descending order, so the minimum is at the end.
            let mut model: Vec<u32> = Vec::new();

            for _ in 0..300 {
                if model.is_empty() || rng.gen_bool(0.6) {
                    // Narrow range so equal priorities are common.
                    let priority = rng.gen_range(0..16);
                    bucket.enqueue(priority, priority);
                    model.push(priority);
                    model.sort_unstable_by(|a, b| b.cmp(a));
                } else {
                    assert_eq!(bucket.dequeue().ok(), model.pop(), "seed {}", seed);
                }
                assert_eq!(bucket.len(), model.len());
                assert_eq!(bucket.peek_priority(), model.last());
            }

            while let Some(expected) = model.pop() {
                assert_eq!(bucket.dequeue(), Ok(expected), "seed {}", seed);
            }
            assert_eq!(bucket.dequeue(), Err(QueueError::Empty));
        }
    }
}
