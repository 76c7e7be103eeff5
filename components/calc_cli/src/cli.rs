//! Command-line arguments

use async_runtime::{EventLoopConfig, DEFAULT_MAX_PENDING_TIMERS};
use clap::{ArgAction, Parser};
use core_types::Operation;

/// Deferred arithmetic on a single-threaded event loop.
///
/// Runs one operation when OP, A and B are given; otherwise use --demo or
/// --repl.
#[derive(Parser, Debug)]
#[command(name = "lazy-calc", version, about)]
pub struct Cli {
    /// Operation: add, sub, mul, div (or + - * /)
    #[arg(requires_all = ["a", "b"])]
    pub op: Option<Operation>,

    /// Left operand
    #[arg(allow_negative_numbers = true, requires = "op")]
    pub a: Option<f64>,

    /// Right operand
    #[arg(allow_negative_numbers = true, requires = "op")]
    pub b: Option<f64>,

    /// Run the built-in scenario and print one line per call
    #[arg(short, long, conflicts_with = "repl")]
    pub demo: bool,

    /// Start interactive REPL
    #[arg(short, long)]
    pub repl: bool,

    /// Maximum number of timers pending on the event loop
    #[arg(long, default_value_t = DEFAULT_MAX_PENDING_TIMERS)]
    pub max_pending_timers: usize,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Event loop configuration requested on the command line.
    pub fn event_loop_config(&self) -> EventLoopConfig {
        EventLoopConfig::new().with_max_pending_timers(self.max_pending_timers)
    }

    /// Fallback log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    /// The single operation to evaluate, if one was given.
    pub fn request(&self) -> Option<(Operation, f64, f64)> {
        Some((self.op?, self.a?, self.b?))
    }
}
