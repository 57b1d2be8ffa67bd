use comfy_table::{Cell, Table};

use crate::db::{get_connection, read_all};
use crate::error::Result;
use crate::fmt::signed_money;
use crate::settings::db_path;

pub fn run(limit: usize) -> Result<()> {
    let conn = get_connection(&db_path())?;
    let rows = read_all(&conn)?;
    let total = rows.len();
    let start = total.saturating_sub(limit);

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Name", "Amount", "Category", "Location", "Description"]);
    for t in &rows[start..] {
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.date),
            Cell::new(t.name.as_deref().unwrap_or("")),
            Cell::new(signed_money(t.amount, t.incoming)),
            Cell::new(&t.category),
            Cell::new(t.location.as_deref().unwrap_or("")),
            Cell::new(t.description.as_deref().unwrap_or("")),
        ]);
    }
    println!("Transactions ({} of {total})\n{table}", total - start);
    Ok(())
}
