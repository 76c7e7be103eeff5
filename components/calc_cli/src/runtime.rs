//! Runtime orchestration for the CLI
//!
//! The Runtime owns the event loop and the calculator bound to it, and turns
//! each request into a settled outcome by driving the loop.

use crate::error::{CliError, CliResult};
use async_runtime::{EventLoop, EventLoopConfig};
use core_types::{Operation, OperationRequest, Settlement};
use lazy_calc::Calculator;
use tracing::debug;

/// The calls made by `--demo`, in order.
pub const DEMO_SCENARIO: [(Operation, f64, f64); 5] = [
    (Operation::Add, 1.0, 2.0),
    (Operation::Sub, 10.0, 3.0),
    (Operation::Mul, 16.0, 15.0),
    (Operation::Div, 999.0, 9.0),
    (Operation::Div, 1.0, 0.0),
];

/// Main runtime that wires the calculator to its event loop
pub struct Runtime {
    /// Calculator deferring onto the loop
    calculator: Calculator<EventLoop>,
}

impl Runtime {
    /// Create a new runtime instance
    ///
    /// # Example
    /// ```
    /// use async_runtime::EventLoopConfig;
    /// use calc_cli::Runtime;
    ///
    /// let runtime = Runtime::new(EventLoopConfig::default());
    /// assert_eq!(runtime.evaluate_line("add 1 2").unwrap(), 3.0);
    /// ```
    pub fn new(config: EventLoopConfig) -> Self {
        Self {
            calculator: Calculator::new(EventLoop::with_config(config)),
        }
    }

    /// Get access to the event loop
    pub fn event_loop(&self) -> &EventLoop {
        self.calculator.scheduler()
    }

    /// Get access to the calculator
    pub fn calculator(&self) -> &Calculator<EventLoop> {
        &self.calculator
    }

    /// Defer one operation and drive the loop until it settles
    ///
    /// # Errors
    /// Returns `CliError::Calc` if the promise rejects
    pub fn evaluate(&self, op: Operation, a: f64, b: f64) -> CliResult<f64> {
        let settlement = self.settle(op, a, b)?;
        Ok(settlement?)
    }

    /// Parse an `op a b` line and evaluate it
    pub fn evaluate_line(&self, line: &str) -> CliResult<f64> {
        let request = parse_request(line)?;
        self.evaluate(request.kind(), request.operand1(), request.operand2())
    }

    /// Run [`DEMO_SCENARIO`] one call at a time and return the printed lines
    pub fn run_demo(&self) -> CliResult<Vec<String>> {
        let mut lines = Vec::with_capacity(DEMO_SCENARIO.len());
        for (op, a, b) in DEMO_SCENARIO {
            let settlement = self.settle(op, a, b)?;
            lines.push(format_outcome(&settlement));
        }
        Ok(lines)
    }

    /// Start the REPL (Read-Eval-Print Loop)
    ///
    /// # Errors
    /// Returns `CliError` if REPL encounters a fatal error
    ///
    /// # Example
    /// ```no_run
    /// use async_runtime::EventLoopConfig;
    /// use calc_cli::Runtime;
    ///
    /// let runtime = Runtime::new(EventLoopConfig::default());
    /// runtime.repl().unwrap();
    /// ```
    pub fn repl(&self) -> CliResult<()> {
        crate::repl::run_repl(self)
    }

    fn settle(&self, op: Operation, a: f64, b: f64) -> CliResult<Settlement> {
        let promise = self.calculator.call(op, a, b);
        let settlement = self
            .event_loop()
            .block_on(promise)
            .ok_or(CliError::Stalled)?;
        debug!(%op, a, b, ok = settlement.is_ok(), "evaluated");
        Ok(settlement)
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.event_loop().shutdown();
    }
}

/// Parse `op a b`, for example `div 10 2` or `/ 10 2`
pub fn parse_request(line: &str) -> CliResult<OperationRequest> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [op, a, b] = fields.as_slice() else {
        return Err(CliError::ParseError(format!(
            "expected `<op> <a> <b>`, got {} field(s)",
            fields.len()
        )));
    };

    let op: Operation = op.parse()?;
    let a = parse_operand(a)?;
    let b = parse_operand(b)?;
    Ok(OperationRequest::new(op, a, b))
}

fn parse_operand(field: &str) -> CliResult<f64> {
    field
        .parse()
        .map_err(|_| CliError::ParseError(format!("'{}' is not a number", field)))
}

/// Format a number the way a JavaScript host prints it
///
/// Negative zero prints as `0`. Magnitudes of `1e21` and above, or below
/// `1e-6`, use exponent form such as `1e+21` or `1.5e-7`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    // `{:e}` gives the shortest round-trip mantissa, e.g. `1.5e-7` or `1e21`.
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Format a settled outcome as `v = <value>` or `Error: <message>`
pub fn format_outcome(settlement: &Settlement) -> String {
    match settlement {
        Ok(value) => format!("v = {}", format_number(*value)),
        Err(error) => format!("Error: {}", error),
    }
}
