use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::categorizer::RuleSet;
use crate::db::get_connection;
use crate::error::Result;
use crate::importer::ingest_file;
use crate::settings::{db_path, load_settings};

pub fn run(file: &str) -> Result<()> {
    let file_path = PathBuf::from(file);
    let settings = load_settings();
    let rules = RuleSet::load(settings.rules_path.as_deref().map(Path::new))?;
    let mut conn = get_connection(&db_path())?;

    let result = ingest_file(&mut conn, &file_path, &rules)?;

    println!(
        "{} rows read, {} appended, {} duplicates removed",
        result.read,
        result.appended.to_string().green(),
        result.duplicates_removed.to_string().yellow(),
    );
    println!("Store now holds {} transactions", result.total);
    Ok(())
}
