//! Calculation error types.
//!
//! Every failure that can reach a caller travels through a promise rejection
//! as a [`CalcError`]. The error kind tells callers where the failure came
//! from; the message is what gets shown to users.

use thiserror::Error;

/// Message carried by a [`ErrorKind::DivisionByZero`] rejection.
pub const DIVISION_BY_ZERO: &str = "division by zero";

/// The kind of calculation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Division with a divisor that compares equal to zero
    DivisionByZero,
    /// The event loop refused to register the deferred task
    SchedulingFailed,
    /// The deferred task was dropped before it could settle its promise
    Abandoned,
    /// An operation name that does not map to any exported operation
    UnknownOperation,
}

/// A calculation error with its kind and a human-readable message.
///
/// The `Display` output is the message verbatim, so a rejected division
/// prints exactly `division by zero`.
///
/// # Examples
///
/// ```
/// use core_types::{CalcError, ErrorKind};
///
/// let error = CalcError::division_by_zero();
/// assert_eq!(error.kind, ErrorKind::DivisionByZero);
/// assert_eq!(error.to_string(), "division by zero");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CalcError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
}

impl CalcError {
    /// Creates an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The only domain error: dividing by zero.
    pub fn division_by_zero() -> Self {
        Self::new(ErrorKind::DivisionByZero, DIVISION_BY_ZERO)
    }

    /// Timer registration was refused by the scheduler.
    pub fn scheduling_failed(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::SchedulingFailed, reason)
    }

    /// The settle capability was dropped while the promise was still pending.
    pub fn abandoned() -> Self {
        Self::new(
            ErrorKind::Abandoned,
            "deferred task dropped before completion",
        )
    }

    /// No exported operation is called `name`.
    pub fn unknown_operation(name: &str) -> Self {
        Self::new(
            ErrorKind::UnknownOperation,
            format!("unknown operation '{}'", name),
        )
    }
}
