//! Deferred task scheduling.
//!
//! A [`ScheduledTask`] owns an [`OperationRequest`] and the [`Resolver`] of
//! the promise handed back to the caller. Ownership of the task moves into a
//! [`Scheduler`] at registration and is consumed by the task's single run.

use crate::event_loop::EventLoop;
use crate::promise::{Promise, Resolver};
use crate::timer::TimerId;
use core_types::{CalcError, OperationRequest};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, warn};

/// One deferred computation: the request and the right to settle its promise.
#[derive(Debug)]
pub struct ScheduledTask {
    request: OperationRequest,
    resolver: Resolver,
}

impl ScheduledTask {
    /// Creates a task that will settle `resolver` with the result of `request`.
    pub fn new(request: OperationRequest, resolver: Resolver) -> Self {
        Self { request, resolver }
    }

    /// The request this task will compute.
    pub fn request(&self) -> &OperationRequest {
        &self.request
    }

    /// Computes the request and settles the promise, consuming the task.
    ///
    /// `timer` is the registration that fired this task; it has already been
    /// removed from its queue.
    pub fn run(self, timer: TimerId) {
        let outcome = self.request.dispatch();
        debug!(
            %timer,
            request = %self.request,
            ok = outcome.is_ok(),
            "deferred task complete"
        );
        self.resolver.settle(outcome);
    }

    /// Rejects the promise without computing anything, consuming the task.
    pub fn abort(self, error: CalcError) {
        self.resolver.reject(error);
    }
}

/// A task the scheduler could not register, handed back with the reason.
#[derive(Debug)]
pub struct Rejected {
    /// The task, still holding its resolver
    pub task: ScheduledTask,
    /// Why registration failed
    pub error: CalcError,
}

/// Runs each accepted task exactly once, on a later turn than the one that
/// scheduled it.
pub trait Scheduler {
    /// Registers `task` for deferred execution.
    ///
    /// # Errors
    ///
    /// Hands the task back untouched when it cannot be registered.
    fn schedule(&self, task: ScheduledTask) -> Result<TimerId, Rejected>;
}

impl<S: Scheduler + ?Sized> Scheduler for &S {
    fn schedule(&self, task: ScheduledTask) -> Result<TimerId, Rejected> {
        (**self).schedule(task)
    }
}

impl Scheduler for EventLoop {
    /// Arms a zero-delay one-shot timer whose callback runs the task.
    fn schedule(&self, task: ScheduledTask) -> Result<TimerId, Rejected> {
        if let Err(error) = self.check_capacity() {
            return Err(Rejected { task, error });
        }
        Ok(self.push_timer(Instant::now(), move |timer| task.run(timer)))
    }
}

/// Submits `request` to `scheduler` and returns the promise for its result.
///
/// The promise is always pending on return unless registration failed, in
/// which case it is already rejected with
/// [`core_types::ErrorKind::SchedulingFailed`].
pub fn submit<S: Scheduler + ?Sized>(scheduler: &S, request: OperationRequest) -> Promise {
    let (promise, resolver) = Promise::with_resolver();
    match scheduler.schedule(ScheduledTask::new(request, resolver)) {
        Ok(timer) => debug!(%timer, %request, "deferred task scheduled"),
        Err(Rejected { task, error }) => {
            warn!(%request, %error, "deferred task rejected at registration");
            task.abort(error);
        }
    }
    promise
}

/// A deterministic FIFO scheduler that runs tasks only when told to.
///
/// Implements the same contract as the event loop without any clock, so
/// tests can step through deferred work one task at a time.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<(TimerId, ScheduledTask)>>,
    next_id: Cell<u64>,
    capacity: Option<usize>,
}

impl ManualScheduler {
    /// Creates an unbounded scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler that refuses tasks beyond `capacity` queued ones.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Runs the oldest queued task. Returns false if nothing was queued.
    pub fn run_next(&self) -> bool {
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some((timer, task)) => {
                task.run(timer);
                true
            }
            None => false,
        }
    }

    /// Runs queued tasks, including ones queued while running, until none
    /// remain. Returns how many ran.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        ran
    }

    /// Number of queued tasks.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Returns true if no tasks are queued.
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, task: ScheduledTask) -> Result<TimerId, Rejected> {
        let mut queue = self.queue.borrow_mut();
        if let Some(capacity) = self.capacity {
            if queue.len() >= capacity {
                return Err(Rejected {
                    task,
                    error: CalcError::scheduling_failed(format!(
                        "scheduler is full ({} queued)",
                        queue.len()
                    )),
                });
            }
        }
        let timer = TimerId::from_raw(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        queue.push_back((timer, task));
        Ok(timer)
    }
}
