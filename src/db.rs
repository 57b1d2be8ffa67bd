use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;
use crate::models::{StagedRow, Transaction};

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    start_balance REAL,
    end_balance REAL,
    amount REAL,
    name TEXT,
    description TEXT,
    location TEXT,
    incoming BOOLEAN DEFAULT 0,
    category TEXT DEFAULT 'unknown'
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    // Schema is create-if-absent on every access, so a first command other
    // than `init` still finds the table.
    ensure_schema(&conn)?;
    Ok(conn)
}

pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Insert rows as-is. Uniqueness is not checked here; deduplication is a
/// separate explicit step.
pub fn append(conn: &Connection, rows: &[StagedRow]) -> Result<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO transactions \
         (date, start_balance, end_balance, amount, name, description, location, incoming, category) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;
    for row in rows {
        stmt.execute(rusqlite::params![
            row.date,
            row.start_balance,
            row.end_balance,
            row.amount,
            row.name,
            row.description,
            row.location,
            row.incoming,
            row.category,
        ])?;
    }
    Ok(rows.len())
}

pub fn read_all(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, start_balance, end_balance, amount, name, description, location, incoming, category \
         FROM transactions ORDER BY id",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Transaction {
                id: row.get(0)?,
                date: row.get(1)?,
                start_balance: row.get(2)?,
                end_balance: row.get(3)?,
                amount: row.get(4)?,
                name: row.get(5)?,
                description: row.get(6)?,
                location: row.get(7)?,
                incoming: row.get(8)?,
                category: row.get(9)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn size(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;
    Ok(count)
}

/// Delete every row whose natural key (date, balances, amount, name,
/// description, location) collides with an earlier-inserted row, keeping the
/// lowest id per group. SQLite groups NULLs together in GROUP BY, so nullable
/// key fields compare the way the natural key requires. Idempotent.
pub fn remove_duplicates(conn: &Connection) -> Result<usize> {
    let deleted = conn.execute(
        "DELETE FROM transactions WHERE id NOT IN (
            SELECT MIN(id) FROM transactions
            GROUP BY date, start_balance, end_balance, amount, name, description, location
        )",
        [],
    )?;
    Ok(deleted)
}
