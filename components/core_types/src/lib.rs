//! Core calculation types and error handling.
//!
//! This crate provides the foundational types shared by the deferred
//! calculator: the operation record, its pure dispatch routine and the error
//! type every rejection carries.
//!
//! # Overview
//!
//! - [`Operation`] - The four exported arithmetic operations
//! - [`OperationRequest`] - Immutable operation plus operands
//! - [`CalcError`] - Error with kind and message
//! - [`ErrorKind`] - Where an error came from
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, Operation, OperationRequest};
//!
//! let request = OperationRequest::new(Operation::Add, 2.0, 3.0);
//! assert_eq!(request.dispatch(), Ok(5.0));
//!
//! let error = OperationRequest::new(Operation::Div, 1.0, 0.0)
//!     .dispatch()
//!     .unwrap_err();
//! assert_eq!(error.kind, ErrorKind::DivisionByZero);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod operation;

pub use error::{CalcError, ErrorKind, DIVISION_BY_ZERO};
pub use operation::{Operation, OperationRequest};

/// The outcome a promise settles with.
pub type Settlement = Result<f64, CalcError>;
