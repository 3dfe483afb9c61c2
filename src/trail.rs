//! Bounded position history for one agent.
//!
//! Points are stored oldest first. Pushing past the capacity drops points
//! from the head; a wrap across the world boundary clears the whole trail so
//! renderers never draw a line across the screen.

use glam::Vec2;
use std::collections::VecDeque;

/// FIFO trail buffer with a mutable capacity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    /// Create an empty trail holding at most `capacity` points.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append a point. A zero-capacity trail ignores it.
    pub fn push(&mut self, point: Vec2) {
        if self.capacity == 0 {
            return;
        }
        self.points.push_back(point);
        self.truncate();
    }

    /// Drop every point.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Change the capacity, dropping the oldest points if it shrank.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.truncate();
    }

    fn truncate(&mut self) {
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Vec2> + ExactSizeIterator {
        self.points.iter()
    }

    /// Most recent point.
    pub fn newest(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    /// Copy the points out, oldest first.
    pub fn to_vec(&self) -> Vec<Vec2> {
        self.points.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32) -> Vec2 {
        Vec2::new(x, 0.0)
    }

    #[test]
    fn test_fifo_eviction() {
        let mut trail = Trail::new(3);
        for i in 0..5 {
            trail.push(p(i as f32));
        }
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.to_vec(), vec![p(2.0), p(3.0), p(4.0)]);
        assert_eq!(trail.newest(), Some(p(4.0)));
    }

    #[test]
    fn test_zero_capacity_is_noop() {
        let mut trail = Trail::new(0);
        trail.push(p(1.0));
        assert!(trail.is_empty());
    }

    #[test]
    fn test_shrinking_capacity_keeps_newest() {
        let mut trail = Trail::new(10);
        for i in 0..10 {
            trail.push(p(i as f32));
        }
        trail.set_capacity(4);
        assert_eq!(trail.to_vec(), vec![p(6.0), p(7.0), p(8.0), p(9.0)]);

        trail.set_capacity(0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut trail = Trail::new(5);
        trail.push(p(1.0));
        trail.push(p(2.0));
        trail.clear();
        assert!(trail.is_empty());
        assert_eq!(trail.capacity(), 5);
    }
}
