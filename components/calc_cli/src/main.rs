//! Lazy Calc CLI
//!
//! Entry point for the deferred calculator. Parses CLI arguments, installs
//! logging and delegates to the Runtime.

use calc_cli::{format_number, Cli, CliError, Runtime};
use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let runtime = Runtime::new(cli.event_loop_config());

    if cli.demo {
        for line in runtime.run_demo()? {
            println!("{}", line);
        }
    } else if cli.repl {
        runtime.repl()?;
    } else if let Some((op, a, b)) = cli.request() {
        match runtime.evaluate(op, a, b) {
            Ok(value) => println!("v = {}", format_number(value)),
            Err(CliError::Calc(e)) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        }
    } else {
        // Default: show usage
        println!("Lazy Calc v{}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Usage:");
        println!("  lazy-calc <OP> <A> <B>   Run one deferred operation");
        println!("  lazy-calc --demo         Run the built-in scenario");
        println!("  lazy-calc --repl         Start interactive REPL");
        println!();
        println!("Run 'lazy-calc --help' for more options.");
    }

    Ok(())
}
