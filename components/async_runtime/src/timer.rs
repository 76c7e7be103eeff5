//! One-shot timer queue.
//!
//! Timers are ordered by deadline, then by registration sequence, so timers
//! that share a deadline fire in the order they were registered.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::time::Instant;

/// Identifies a timer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Creates an id from its raw sequence number.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw sequence number.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Callback run when a timer fires. Receives the id of its own registration.
pub type TimerCallback = Box<dyn FnOnce(TimerId)>;

/// A registered one-shot timer.
///
/// The callback is consumed when the timer fires, so a timer can never run
/// twice.
pub struct Timer {
    id: TimerId,
    deadline: Instant,
    callback: TimerCallback,
}

impl Timer {
    /// Creates a new Timer.
    pub fn new<F>(id: TimerId, deadline: Instant, callback: F) -> Self
    where
        F: FnOnce(TimerId) + 'static,
    {
        Self {
            id,
            deadline,
            callback: Box::new(callback),
        }
    }

    /// The id of this registration.
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// When the timer becomes due.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Fires the timer, consuming it.
    pub fn fire(self) {
        (self.callback)(self.id)
    }

    fn key(&self) -> (Instant, TimerId) {
        (self.deadline, self.id)
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("id", &self.id)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// A queue of pending timers, earliest deadline first.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Timer>>,
}

impl TimerQueue {
    /// Creates a new empty TimerQueue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Adds a timer to the queue.
    pub fn push(&mut self, timer: Timer) {
        self.heap.push(Reverse(timer));
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse(timer)| timer.deadline)
    }

    /// Removes and returns the earliest timer if it is due at `now` and was
    /// registered before `horizon`.
    ///
    /// Timers registered at or after `horizon` stay queued even when due, so
    /// a timer armed while a turn is firing waits for the next turn.
    pub fn pop_due(&mut self, now: Instant, horizon: TimerId) -> Option<Timer> {
        let Reverse(next) = self.heap.peek()?;
        if next.deadline > now || next.id >= horizon {
            return None;
        }
        self.heap.pop().map(|Reverse(timer)| timer)
    }

    /// Returns true if no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of pending timers.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Removes every pending timer without firing it.
    pub fn drain(&mut self) -> Vec<Timer> {
        self.heap.drain().map(|Reverse(timer)| timer).collect()
    }
}
