use std::path::PathBuf;

use crate::db::{ensure_schema, get_connection};
use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(data_dir: Option<String>, rules: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    if let Some(rules_file) = rules {
        settings.rules_path = Some(shellexpand_path(&rules_file));
    }
    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;

    let conn = get_connection(&resolved.join("guilder.db"))?;
    ensure_schema(&conn)?;

    println!("Initialized guilder at {}", resolved.display());
    Ok(())
}
