//! # Stockroom Console Library
//!
//! Application layer for Stockroom: the intent-dispatch state any front end
//! drives, plus the `stockroom` command-line front end.
//!
//! ## Module Organization
//! ```text
//! stockroom_console/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── inventory.rs◄─── InventoryState, intents, snapshots
//! ├── commands/
//! │   ├── mod.rs      ◄─── Subcommand dispatch
//! │   ├── product.rs  ◄─── list / add / edit / delete
//! │   └── render.rs   ◄─── Table and JSON output
//! └── error.rs        ◄─── AppError { code, message }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use stockroom_sync::SyncConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::AppResult;
use state::InventoryState;

/// Runs one command-line invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Console Startup                                   │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • --config PATH, else the platform config dir                       │
/// │     • STOCKROOM_API_URL / STOCKROOM_SUCCESS_TTL_MS                      │
/// │     • --api-url wins over both                                          │
/// │                                                                         │
/// │  2. Build InventoryState ─────────────────────────────────────────────► │
/// │     • SyncEngine (ProductsApi, ProductStore, NotificationCenter)        │
/// │                                                                         │
/// │  3. Execute Command ──────────────────────────────────────────────────► │
/// │     • initial load, then the command's intents                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<()> {
    let mut config = SyncConfig::load(cli.config)?;
    if let Some(url) = cli.api_url {
        config.api.base_url = Some(url);
        config.validate()?;
    }

    let state = InventoryState::from_config(&config)?;
    info!(base_url = %state.engine().api().base_url(), "Stockroom console starting");

    commands::execute(&state, cli.command, cli.json).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockroom=trace` - Show trace for stockroom crates only
/// - Default: WARN, with INFO for stockroom crates (DEBUG with `-v`)
///
/// Logs go to stderr so stdout stays clean for tables and JSON.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,stockroom=debug"
    } else {
        "warn,stockroom=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
