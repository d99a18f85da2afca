//! Deadline queue with deterministic ordering.
//!
//! Timers fire in deadline order; equal deadlines fire in the order they
//! were scheduled. Cancelling everything pending is a single [`TimerQueue::clear`].

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::engine::ShowTime;

/// A pending action and when it is due.
#[derive(Debug, Clone)]
pub struct ScheduledTimer<A> {
    /// When the action becomes due.
    pub deadline: ShowTime,
    /// Insertion counter used to break deadline ties.
    pub sequence: u64,
    /// The action to perform.
    pub action: A,
}

impl<A> ScheduledTimer<A> {
    /// Create a scheduled timer.
    #[must_use]
    pub const fn new(deadline: ShowTime, sequence: u64, action: A) -> Self {
        Self {
            deadline,
            sequence,
            action,
        }
    }
}

// Identity is (deadline, sequence); the payload does not participate.
impl<A> PartialEq for ScheduledTimer<A> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.sequence == other.sequence
    }
}

impl<A> Eq for ScheduledTimer<A> {}

impl<A> PartialOrd for ScheduledTimer<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for ScheduledTimer<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

/// Min-queue of timers keyed by `(deadline, sequence)`.
///
/// # Example
///
/// ```rust
/// use hexa_showcase::engine::{ShowTime, TimerQueue};
///
/// let mut timers = TimerQueue::new();
/// timers.schedule(ShowTime::from_millis(550), "echo");
/// timers.schedule(ShowTime::from_millis(50), "type");
///
/// let due = timers.drain_until(ShowTime::from_millis(100));
/// assert_eq!(due.len(), 1);
/// assert_eq!(due[0].action, "type");
/// ```
#[derive(Debug)]
pub struct TimerQueue<A> {
    heap: BinaryHeap<Reverse<ScheduledTimer<A>>>,
    sequence: u64,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            sequence: 0,
        }
    }
}

impl<A> TimerQueue<A> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` at `deadline`.
    pub fn schedule(&mut self, deadline: ShowTime, action: A) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.heap
            .push(Reverse(ScheduledTimer::new(deadline, sequence, action)));
    }

    /// Remove and return the earliest timer if it is due at `now`.
    #[must_use]
    pub fn pop_due(&mut self, now: ShowTime) -> Option<ScheduledTimer<A>> {
        match self.heap.peek() {
            Some(Reverse(timer)) if timer.deadline <= now => {
                self.heap.pop().map(|Reverse(timer)| timer)
            }
            _ => None,
        }
    }

    /// Remove and return every timer due at `now`, earliest first.
    #[must_use]
    pub fn drain_until(&mut self, now: ShowTime) -> Vec<ScheduledTimer<A>> {
        let mut due = Vec::new();
        while let Some(timer) = self.pop_due(now) {
            due.push(timer);
        }
        due
    }

    /// Earliest pending timer.
    #[must_use]
    pub fn peek(&self) -> Option<&ScheduledTimer<A>> {
        self.heap.peek().map(|Reverse(timer)| timer)
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<ShowTime> {
        self.peek().map(|timer| timer.deadline)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Cancel every pending timer.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
