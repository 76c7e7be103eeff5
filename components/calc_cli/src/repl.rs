//! REPL (Read-Eval-Print Loop) implementation

use crate::error::{CliError, CliResult};
use crate::runtime::{format_number, Runtime};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Run the interactive REPL
///
/// Each line is `<op> <a> <b>`; the result is printed once the deferred
/// call settles.
///
/// # Returns
/// `Ok(())` when REPL exits normally
pub fn run_repl(runtime: &Runtime) -> CliResult<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::ReplError(format!("Failed to initialize editor: {}", e)))?;

    println!("Lazy Calc v{}", env!("CARGO_PKG_VERSION"));
    println!("Type `<op> <a> <b>` (e.g. `div 10 2`) or 'exit' to quit.");
    println!();

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                if trimmed == "exit" || trimmed == ".exit" || trimmed == "quit" {
                    println!("Goodbye!");
                    break;
                }

                if trimmed.starts_with('.') {
                    handle_repl_command(trimmed, runtime);
                    continue;
                }

                let _ = editor.add_history_entry(trimmed);

                match runtime.evaluate_line(trimmed) {
                    Ok(value) => println!("{}", format_number(value)),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C
                println!("Press Ctrl-D or type 'exit' to quit");
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                return Err(CliError::ReplError(format!("Readline error: {}", err)));
            }
        }
    }

    Ok(())
}

/// Handle special REPL commands
fn handle_repl_command(command: &str, runtime: &Runtime) {
    match command {
        ".help" => {
            println!("REPL Commands:");
            println!("  <op> <a> <b> - Run add, sub, mul or div (or + - * /)");
            println!("  .help        - Show this help message");
            println!("  .clear       - Clear the screen");
            println!("  .loop        - Show event loop status");
            println!("  .exit        - Exit the REPL");
        }
        ".clear" => {
            print!("\x1B[2J\x1B[1;1H");
        }
        ".loop" => {
            let event_loop = runtime.event_loop();
            println!(
                "iterations: {}, pending timers: {}, capacity: {}",
                event_loop.iterations(),
                event_loop.pending_timers(),
                event_loop.config().max_pending_timers
            );
        }
        _ => {
            println!("Unknown command: {}", command);
            println!("Type .help for available commands");
        }
    }
}
