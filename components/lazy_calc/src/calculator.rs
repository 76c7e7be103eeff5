//! The four exported operations.

use async_runtime::{submit, EventLoop, Promise, Scheduler};
use core_types::{Operation, OperationRequest};
use tracing::trace;

/// Entry points for deferred arithmetic over a scheduler.
///
/// None of the methods fail synchronously: every outcome, including a
/// refused registration, arrives through the returned promise.
#[derive(Debug, Clone, Default)]
pub struct Calculator<S = EventLoop> {
    scheduler: S,
}

impl<S: Scheduler> Calculator<S> {
    /// Creates a calculator that defers work onto `scheduler`.
    pub fn new(scheduler: S) -> Self {
        Self { scheduler }
    }

    /// The scheduler work is deferred onto.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Defers `op` on `a` and `b`.
    pub fn call(&self, op: Operation, a: f64, b: f64) -> Promise {
        trace!(%op, a, b, "calculator call");
        submit(&self.scheduler, OperationRequest::new(op, a, b))
    }

    /// Resolves to `a + b`.
    pub fn add(&self, a: f64, b: f64) -> Promise {
        self.call(Operation::Add, a, b)
    }

    /// Resolves to `a - b`.
    pub fn sub(&self, a: f64, b: f64) -> Promise {
        self.call(Operation::Sub, a, b)
    }

    /// Resolves to `a * b`.
    pub fn mul(&self, a: f64, b: f64) -> Promise {
        self.call(Operation::Mul, a, b)
    }

    /// Resolves to `a / b`, or rejects with `division by zero` when `b == 0`.
    pub fn div(&self, a: f64, b: f64) -> Promise {
        self.call(Operation::Div, a, b)
    }
}
