//! # Command-Line Arguments
//!
//! ```text
//! stockroom [--config PATH] [--api-url URL] [--json] [-v] <COMMAND>
//!
//!   list    [--search TEXT] [--bucket all|low|medium|high]
//!   add     --name N --sku S --quantity Q --description D
//!   edit    <ID> <quantity|sku|description> <VALUE>
//!   delete  <ID>
//!   stats
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stockroom_core::{EditField, StockFilter};

/// Inventory console for a `/products` backend.
#[derive(Debug, Parser)]
#[command(name = "stockroom", version, about)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding config and environment
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products, optionally searched and filtered by stock level
    List {
        /// Case-insensitive match on name, SKU or description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Stock bucket: all, low, medium or high
        #[arg(short, long, default_value = "all")]
        bucket: StockFilter,
    },

    /// Add a product (all fields required)
    Add {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        sku: String,

        #[arg(long, default_value = "")]
        quantity: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Change one field of a product
    Edit {
        /// Product id
        id: String,

        /// quantity, sku or description
        field: EditField,

        /// New value
        value: String,
    },

    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },

    /// Show stock statistics
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_bucket() {
        let cli = Cli::try_parse_from(["stockroom", "list", "--bucket", "low", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Command::List { search, bucket } => {
                assert_eq!(search, "");
                assert_eq!(bucket, StockFilter::LowStock);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_edit() {
        let cli = Cli::try_parse_from(["stockroom", "edit", "p-1", "qty", "12"]).unwrap();
        match cli.command {
            Command::Edit { id, field, value } => {
                assert_eq!(id, "p-1");
                assert_eq!(field, EditField::Quantity);
                assert_eq!(value, "12");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_bucket_rejected() {
        assert!(Cli::try_parse_from(["stockroom", "list", "--bucket", "tiny"]).is_err());
    }
}
