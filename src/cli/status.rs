use crate::db::{get_connection, size};
use crate::error::Result;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join("guilder.db");

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());
    println!(
        "Rules:      {}",
        settings.rules_path.as_deref().unwrap_or("(built-in)")
    );

    if db_path.exists() {
        let conn = get_connection(&db_path)?;
        println!();
        println!("Transactions:  {}", size(&conn)?);

        let mut stmt = conn.prepare(
            "SELECT category, count(*) FROM transactions GROUP BY category ORDER BY count(*) DESC",
        )?;
        let counts: Vec<(String, i64)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        for (category, count) in counts {
            println!("  {category:<14} {count}");
        }
    } else {
        println!();
        println!("Database not found. Run `guilder init` to set up.");
    }

    Ok(())
}
