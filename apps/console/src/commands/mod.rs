//! # Commands Module
//!
//! Command-line subcommands, each a short script of intents against
//! [`InventoryState`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch + error wording)
//! ├── product.rs  ◄─── list, add, edit, delete
//! └── render.rs   ◄─── Table and JSON output
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stockroom edit p-1 quantity 12                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  state.load()                   ◄── initial fetch                       │
//! │  state.on_open_edit(p-1, Quantity)                                      │
//! │  state.on_edit_value_change("12")                                       │
//! │  state.on_commit_edit()         ◄── PUT + refetch                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  render: success banner + product table (or JSON snapshot)             │
//! │                                                                         │
//! │  On failure the error banner text becomes the AppError message.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
pub mod render;

use crate::cli::Command;
use crate::error::{AppError, AppResult};
use crate::state::InventoryState;

/// Runs one subcommand against a freshly created state.
pub async fn execute(state: &InventoryState, command: Command, json: bool) -> AppResult<()> {
    let result = run_command(state, command, json).await;

    result.map_err(|err| match state.notifications().error {
        Some(notice) => AppError {
            message: notice.message,
            ..err
        },
        None => err,
    })
}

async fn run_command(state: &InventoryState, command: Command, json: bool) -> AppResult<()> {
    state.load().await?;

    match command {
        Command::List { search, bucket } => product::list(state, search, bucket, json),
        Command::Add {
            name,
            sku,
            quantity,
            description,
        } => product::add(state, name, sku, quantity, description, json).await,
        Command::Edit { id, field, value } => product::edit(state, id, field, value, json).await,
        Command::Delete { id } => product::delete(state, id, json).await,
        Command::Stats => {
            render::stats(&state.stats(), json);
            Ok(())
        }
    }
}
