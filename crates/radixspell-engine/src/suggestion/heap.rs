// Fixed-capacity heap keeping the best items seen so far

use std::collections::BinaryHeap;

use crate::error::SpellError;

/// Keeps the `capacity` smallest items offered to it.
///
/// A max-heap with the worst kept item on top: a better newcomer replaces
/// that item in place once the heap is full.
#[derive(Debug, Clone)]
pub struct BoundedHeap<T: Ord> {
    heap: BinaryHeap<T>,
    capacity: usize,
}

impl<T: Ord> BoundedHeap<T> {
    pub fn try_with_capacity(capacity: usize) -> Result<Self, SpellError> {
        let mut heap = BinaryHeap::new();
        heap.try_reserve_exact(capacity)
            .map_err(|_| SpellError::OutOfMemory {
                what: "suggestion heap",
            })?;
        Ok(Self { heap, capacity })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// The worst item kept.
    #[inline]
    pub fn worst(&self) -> Option<&T> {
        self.heap.peek()
    }

    /// True when `item` would be kept if offered now.
    pub fn admits(&self, item: &T) -> bool {
        if !self.is_full() {
            return self.capacity > 0;
        }
        self.worst().is_some_and(|worst| item < worst)
    }

    /// Offer `item`; returns whether it was kept.
    pub fn offer(&mut self, item: T) -> bool {
        if !self.is_full() {
            self.heap.push(item);
            return true;
        }
        match self.heap.peek_mut() {
            Some(mut worst) if item < *worst => {
                *worst = item;
                true
            }
            _ => false,
        }
    }

    /// Kept items, best first.
    pub fn to_sorted_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.heap.clone().into_sorted_vec()
    }

    /// Kept items, best first.
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.heap.into_sorted_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_smallest_under_adversarial_order() {
        let mut heap = BoundedHeap::try_with_capacity(5).unwrap();
        // Worst first: every later item beats everything kept.
        for value in (0..1000u32).rev() {
            heap.offer(value);
        }
        assert!(heap.is_full());
        assert_eq!(heap.worst(), Some(&4));
        assert_eq!(heap.into_sorted_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn rejects_items_no_better_than_the_worst() {
        let mut heap = BoundedHeap::try_with_capacity(2).unwrap();
        assert!(heap.offer(3));
        assert!(heap.offer(1));
        assert!(!heap.admits(&3));
        assert!(!heap.offer(3));
        assert!(heap.admits(&2));
        assert!(heap.offer(2));
        assert_eq!(heap.to_sorted_vec(), vec![1, 2]);
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn interleaved_order_matches_sorting() {
        let values: Vec<u32> = (0..500).map(|i| (i * 7919) % 503).collect();
        let mut heap = BoundedHeap::try_with_capacity(10).unwrap();
        for &v in &values {
            heap.offer(v);
        }
        let mut expected = values.clone();
        expected.sort_unstable();
        expected.truncate(10);
        assert_eq!(heap.into_sorted_vec(), expected);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut heap = BoundedHeap::try_with_capacity(0).unwrap();
        assert!(!heap.admits(&1));
        assert!(!heap.offer(1));
        assert!(heap.is_empty());
    }
}
