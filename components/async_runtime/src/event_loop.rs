//! Event loop implementation.
//!
//! This module provides a single-threaded event loop driven by one-shot
//! timers. Each iteration (turn) of the loop:
//! 1. Takes a snapshot of the clock and of the next timer id
//! 2. Fires every timer that is due and was registered before the snapshot,
//!    earliest deadline first, registration order among equal deadlines
//! 3. Repeats
//!
//! Timers armed by a callback during a turn never fire in that same turn.

use crate::timer::{Timer, TimerId, TimerQueue};
use core_types::CalcError;
use futures::task::noop_waker_ref;
use std::cell::RefCell;
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Default upper bound on timers pending at once.
pub const DEFAULT_MAX_PENDING_TIMERS: usize = 65_536;

/// Event loop configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventLoopConfig {
    /// Registrations beyond this many pending timers are refused.
    pub max_pending_timers: usize,
}

impl EventLoopConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            max_pending_timers: DEFAULT_MAX_PENDING_TIMERS,
        }
    }

    /// Sets the pending-timer capacity.
    pub fn with_max_pending_timers(mut self, max_pending_timers: usize) -> Self {
        self.max_pending_timers = max_pending_timers;
        self
    }
}

impl Default for EventLoopConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct LoopState {
    config: EventLoopConfig,
    timers: TimerQueue,
    next_id: u64,
    iterations: u64,
    shut_down: bool,
}

impl LoopState {
    fn check_capacity(&self) -> Result<(), CalcError> {
        if self.shut_down {
            warn!("timer registration refused after shutdown");
            return Err(CalcError::scheduling_failed("event loop is shut down"));
        }
        let pending = self.timers.len();
        if pending >= self.config.max_pending_timers {
            warn!(
                pending,
                max = self.config.max_pending_timers,
                "timer registration refused"
            );
            return Err(CalcError::scheduling_failed(format!(
                "timer queue is full ({} pending)",
                pending
            )));
        }
        Ok(())
    }
}

impl Drop for LoopState {
    fn drop(&mut self) {
        // Dropping a timer drops its callback; tasks still holding a resolver
        // reject their promise as abandoned.
        let abandoned = self.timers.drain();
        if !abandoned.is_empty() {
            debug!(count = abandoned.len(), "event loop dropped with pending timers");
        }
    }
}

/// The event loop.
///
/// `EventLoop` is a cheap handle: clones share the same timer queue, so a
/// callback can capture a clone and arm further timers. The loop is confined
/// to the thread that created it.
///
/// # Examples
///
/// ```
/// use async_runtime::EventLoop;
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let event_loop = EventLoop::new();
/// let fired = Rc::new(Cell::new(false));
///
/// let f = Rc::clone(&fired);
/// event_loop
///     .set_timeout(Duration::ZERO, move |_| f.set(true))
///     .unwrap();
/// assert!(!fired.get());
///
/// event_loop.run_until_done();
/// assert!(fired.get());
/// ```
#[derive(Debug, Clone)]
pub struct EventLoop {
    state: Rc<RefCell<LoopState>>,
}

impl EventLoop {
    /// Creates a new EventLoop with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EventLoopConfig::default())
    }

    /// Creates a new EventLoop with `config`.
    pub fn with_config(config: EventLoopConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(LoopState {
                config,
                timers: TimerQueue::new(),
                next_id: 0,
                iterations: 0,
                shut_down: false,
            })),
        }
    }

    /// The configuration the loop was created with.
    pub fn config(&self) -> EventLoopConfig {
        self.state.borrow().config
    }

    /// Arms a one-shot timer that fires `callback` after `delay`.
    ///
    /// Even with a zero delay the callback never runs before this call
    /// returns; it runs on a later turn of the loop.
    ///
    /// # Errors
    ///
    /// Returns a [`core_types::ErrorKind::SchedulingFailed`] error when the
    /// loop is at capacity or the deadline cannot be represented.
    pub fn set_timeout<F>(&self, delay: Duration, callback: F) -> Result<TimerId, CalcError>
    where
        F: FnOnce(TimerId) + 'static,
    {
        self.state.borrow().check_capacity()?;
        let deadline = Instant::now()
            .checked_add(delay)
            .ok_or_else(|| CalcError::scheduling_failed("timer delay out of range"))?;
        Ok(self.push_timer(deadline, callback))
    }

    /// Checks whether a new timer would be accepted right now.
    pub(crate) fn check_capacity(&self) -> Result<(), CalcError> {
        self.state.borrow().check_capacity()
    }

    /// Queues a timer without a capacity check.
    pub(crate) fn push_timer<F>(&self, deadline: Instant, callback: F) -> TimerId
    where
        F: FnOnce(TimerId) + 'static,
    {
        let mut state = self.state.borrow_mut();
        let id = TimerId::from_raw(state.next_id);
        state.next_id += 1;
        state.timers.push(Timer::new(id, deadline, callback));
        trace!(timer = %id, pending = state.timers.len(), "timer armed");
        id
    }

    /// Stops the loop and drops every pending timer. Returns how many were
    /// dropped.
    ///
    /// Queued tasks reject their promise as abandoned. Any registration made
    /// afterwards, including one from a reaction run by that rejection, is
    /// refused. Callbacks that hold a clone of the loop keep its state alive,
    /// so this is the only way to release them without running them.
    pub fn shutdown(&self) -> usize {
        let abandoned = {
            let mut state = self.state.borrow_mut();
            state.shut_down = true;
            state.timers.drain()
        };
        // Dropped outside the borrow: resolvers run reactions as they go.
        let count = abandoned.len();
        drop(abandoned);
        debug!(count, "event loop shut down");
        count
    }

    /// Returns true once [`EventLoop::shutdown`] has been called.
    pub fn is_shut_down(&self) -> bool {
        self.state.borrow().shut_down
    }

    /// Returns the number of timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Returns true if no timers are pending.
    pub fn is_idle(&self) -> bool {
        self.state.borrow().timers.is_empty()
    }

    /// Number of turns the loop has run.
    pub fn iterations(&self) -> u64 {
        self.state.borrow().iterations
    }

    /// Runs one turn of the loop and returns how many timers fired.
    ///
    /// Does not wait: timers whose deadline is still in the future are left
    /// for a later turn.
    pub fn run_once(&self) -> usize {
        let (now, horizon) = {
            let mut state = self.state.borrow_mut();
            state.iterations += 1;
            (Instant::now(), TimerId::from_raw(state.next_id))
        };

        let mut fired = 0;
        loop {
            // The queue borrow must end before the callback runs.
            let timer = self.state.borrow_mut().timers.pop_due(now, horizon);
            let Some(timer) = timer else {
                break;
            };
            trace!(timer = %timer.id(), "timer fired");
            timer.fire();
            fired += 1;
        }

        trace!(fired, pending = self.pending_timers(), "loop turn complete");
        fired
    }

    /// Runs the loop until no timers remain, sleeping until the next deadline
    /// whenever nothing is due. Returns the total number of timers fired.
    pub fn run_until_done(&self) -> usize {
        let mut total = 0;
        while let Some(deadline) = self.next_deadline() {
            wait_until(deadline);
            total += self.run_once();
        }
        debug!(fired = total, "event loop drained");
        total
    }

    /// Drives the loop until `future` completes.
    ///
    /// Returns `None` if the loop runs out of timers while the future is
    /// still pending, since nothing could ever complete it.
    pub fn block_on<F: Future>(&self, future: F) -> Option<F::Output> {
        let mut future = pin!(future);
        let mut cx = Context::from_waker(noop_waker_ref());
        loop {
            if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
                return Some(output);
            }
            let Some(deadline) = self.next_deadline() else {
                debug!("event loop idle with future still pending");
                return None;
            };
            wait_until(deadline);
            self.run_once();
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.state.borrow().timers.next_deadline()
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

fn wait_until(deadline: Instant) {
    let now = Instant::now();
    if deadline > now {
        std::thread::sleep(deadline - now);
    }
}
