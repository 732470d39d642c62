//! # Stockroom Console Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logging to stderr)
//! 3. Run the command (see [`stockroom_console::run`])
//! 4. Map any error to an exit code

use std::process::ExitCode;

use clap::Parser;
use stockroom_console::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;
    stockroom_console::init_tracing(cli.verbose);

    match stockroom_console::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json {
                stockroom_console::commands::render::json(&err);
            } else {
                eprintln!("Error: {}", err.message);
            }
            ExitCode::from(err.code.exit_code())
        }
    }
}
