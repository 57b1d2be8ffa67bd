mod categorizer;
mod cli;
mod db;
mod error;
mod fmt;
mod importer;
mod models;
mod parser;
mod reconciler;
mod settings;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir, rules } => cli::init::run(data_dir, rules),
        Commands::Import { file } => cli::import::run(&file),
        Commands::Transactions { limit } => cli::transactions::run(limit),
        Commands::Categories => cli::categories::run(),
        Commands::Dedupe => cli::dedupe::run(),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
