//! profrate CLI entry point
//!
//! Parses arguments and delegates to the CLI module. Prints errors to
//! stderr and exits non-zero on failure.

use profrate::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
