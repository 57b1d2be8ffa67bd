use crate::db::{get_connection, remove_duplicates, size};
use crate::error::Result;
use crate::settings::db_path;

pub fn run() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let removed = remove_duplicates(&conn)?;
    println!("{removed} duplicate rows removed, {} remain", size(&conn)?);
    Ok(())
}
