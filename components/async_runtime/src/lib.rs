//! Deferred execution runtime.
//!
//! This crate provides the machinery that bridges a synchronous call to an
//! asynchronous completion on a single-threaded event loop:
//! - Event loop driven by one-shot timers
//! - Promise with a separate, consume-once resolver
//! - Scheduler seam with a timer-backed and a manual implementation
//!
//! # Overview
//!
//! - [`EventLoop`] - Timer loop; also the default [`Scheduler`]
//! - [`Promise`] / [`Resolver`] - Observable outcome and its settle capability
//! - [`ScheduledTask`] - Request plus resolver, run exactly once
//! - [`submit`] - Schedule a request and get its promise back
//! - [`ManualScheduler`] - Deterministic scheduler for tests
//!
//! # Examples
//!
//! ```
//! use async_runtime::{submit, EventLoop, PromiseState};
//! use core_types::{Operation, OperationRequest};
//!
//! let event_loop = EventLoop::new();
//! let promise = submit(&event_loop, OperationRequest::new(Operation::Add, 2.0, 3.0));
//! assert_eq!(promise.state(), PromiseState::Pending);
//!
//! event_loop.run_until_done();
//! assert_eq!(promise.value(), Some(5.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod event_loop;
pub mod promise;
pub mod scheduler;
pub mod timer;

// Re-export main types at crate root
pub use event_loop::{EventLoop, EventLoopConfig, DEFAULT_MAX_PENDING_TIMERS};
pub use promise::{Promise, PromiseState, Resolver};
pub use scheduler::{submit, ManualScheduler, Rejected, ScheduledTask, Scheduler};
pub use timer::{Timer, TimerCallback, TimerId, TimerQueue};
