pub mod categories;
pub mod dedupe;
pub mod import;
pub mod init;
pub mod status;
pub mod transactions;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "guilder", about = "Statement ingestion and categorization CLI for Dutch bank exports.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up guilder: choose a data directory and initialize the store.
    Init {
        /// Path for guilder data (default: ~/Documents/guilder)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// JSON file with category rules, overriding the built-in set
        #[arg(long = "rules")]
        rules: Option<String>,
    },
    /// Ingest a bank statement export (.xls, .xlsx, .csv or tab-separated .txt).
    Import {
        /// Path to the statement file
        file: String,
    },
    /// List stored transactions.
    Transactions {
        /// Show at most this many rows (most recent last)
        #[arg(long, default_value = "25")]
        limit: usize,
    },
    /// Show the active category rule set in priority order.
    Categories,
    /// Remove duplicate rows sharing the natural key, keeping the earliest.
    Dedupe,
    /// Show current database and summary statistics.
    Status,
}
