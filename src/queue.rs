//! # Queue Module
//!
//! FIFO buffers decoupling request intake from processing and processing
//! from emission. Insertion at the tail, removal at the head; popping an
//! empty queue is a normal "no item" result, never an error.
//!
//! In the single-threaded poll model the internal mutex reduces to plain
//! sequential access; it exists so that a host driving pipeline stages from
//! more than one thread still cannot break FIFO order.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::server::{Request, Response};

/// An ordered FIFO buffer between pipeline stages.
#[derive(Debug, Default)]
pub struct Queue<T> {
    items: Mutex<VecDeque<T>>,
}

impl<T> Queue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
        }
    }

    /// Append an item at the tail.
    pub fn push(&self, item: T) {
        self.lock().push_back(item);
    }

    /// Remove and return the head item, or `None` when the queue is empty.
    #[must_use]
    pub fn pop(&self) -> Option<T> {
        self.lock().pop_front()
    }

    /// Current depth. Advisory when other threads are pushing concurrently.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<T>> {
        // A poisoned queue still holds valid items; keep serving them.
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Queue of requests awaiting dispatch.
pub type RequestQueue = Queue<Request>;

/// Queue of responses awaiting emission.
pub type ResponseQueue = Queue<Response>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let queue = Queue::new();
        queue.push(1);
        queue.push(2);
        queue.push(3);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
    }

    #[test]
    fn test_pop_empty_is_none() {
        let queue: Queue<u32> = Queue::new();
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_len_tracks_push_and_pop() {
        let queue = Queue::new();
        assert_eq!(queue.len(), 0);
        queue.push("a");
        queue.push("b");
        assert_eq!(queue.len(), 2);
        let _ = queue.pop();
        assert_eq!(queue.len(), 1);
    }
}
