//! Arithmetic operations and the immutable request record.
//!
//! An [`OperationRequest`] captures which operation to run and on which
//! operands. [`OperationRequest::dispatch`] performs the arithmetic and
//! returns a tagged result; it has no side effects.

use crate::error::CalcError;
use std::fmt;
use std::str::FromStr;

/// A binary arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`, rejected when `b == 0`
    Div,
}

impl Operation {
    /// All exported operations, in export order.
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
    ];

    /// The exported name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Mul => "mul",
            Operation::Div => "div",
        }
    }

    /// Applies the operation to two operands.
    ///
    /// The divisor check is an exact IEEE comparison: `0.0` and `-0.0` are
    /// rejected, tiny non-zero divisors are not.
    pub fn apply(self, operand1: f64, operand2: f64) -> Result<f64, CalcError> {
        match self {
            Operation::Add => Ok(operand1 + operand2),
            Operation::Sub => Ok(operand1 - operand2),
            Operation::Mul => Ok(operand1 * operand2),
            Operation::Div => {
                if operand2 == 0.0 {
                    return Err(CalcError::division_by_zero());
                }
                Ok(operand1 / operand2)
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "+" => Ok(Operation::Add),
            "sub" | "-" => Ok(Operation::Sub),
            "mul" | "*" => Ok(Operation::Mul),
            "div" | "/" => Ok(Operation::Div),
            _ => Err(CalcError::unknown_operation(s)),
        }
    }
}

/// An immutable request to run one operation on two operands.
///
/// # Examples
///
/// ```
/// use core_types::{Operation, OperationRequest};
///
/// let request = OperationRequest::new(Operation::Mul, 4.0, 2.5);
/// assert_eq!(request.dispatch(), Ok(10.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationRequest {
    kind: Operation,
    operand1: f64,
    operand2: f64,
}

impl OperationRequest {
    /// Creates a request.
    pub fn new(kind: Operation, operand1: f64, operand2: f64) -> Self {
        Self {
            kind,
            operand1,
            operand2,
        }
    }

    /// The operation to perform.
    pub fn kind(&self) -> Operation {
        self.kind
    }

    /// The left operand.
    pub fn operand1(&self) -> f64 {
        self.operand1
    }

    /// The right operand.
    pub fn operand2(&self) -> f64 {
        self.operand2
    }

    /// Computes the result of the request.
    pub fn dispatch(&self) -> Result<f64, CalcError> {
        self.kind.apply(self.operand1, self.operand2)
    }
}

impl fmt::Display for OperationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.kind, self.operand1, self.operand2)
    }
}
