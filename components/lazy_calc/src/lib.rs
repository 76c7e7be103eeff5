//! Deferred calculator.
//!
//! Exposes `add`, `sub`, `mul` and `div`. Each call returns a pending
//! [`Promise`] immediately; the arithmetic runs on a later turn of the
//! injected scheduler and settles the promise with the result or an error.
//!
//! # Examples
//!
//! ```
//! use async_runtime::EventLoop;
//! use lazy_calc::Calculator;
//!
//! let calc = Calculator::new(EventLoop::new());
//! let sum = calc.add(2.0, 3.0);
//! let quotient = calc.div(1.0, 0.0);
//! assert!(sum.is_pending());
//!
//! calc.scheduler().run_until_done();
//! assert_eq!(sum.value(), Some(5.0));
//! assert_eq!(quotient.error().unwrap().to_string(), "division by zero");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod calculator;

pub use async_runtime::{EventLoop, Promise, PromiseState};
pub use calculator::Calculator;
pub use core_types::{CalcError, ErrorKind, Operation, Settlement};
