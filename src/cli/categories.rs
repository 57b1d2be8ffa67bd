use std::path::Path;

use comfy_table::{Cell, Table};

use crate::categorizer::RuleSet;
use crate::error::Result;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let rules = RuleSet::load(settings.rules_path.as_deref().map(Path::new))?;

    let mut table = Table::new();
    table.set_header(vec!["Priority", "Category"]);
    for (i, label) in rules.labels().enumerate() {
        table.add_row(vec![Cell::new(i + 1), Cell::new(label)]);
    }
    match &settings.rules_path {
        Some(path) => println!("Category rules from {path}\n{table}"),
        None => println!("Built-in category rules\n{table}"),
    }
    Ok(())
}
