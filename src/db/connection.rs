use crate::error::StoreError;
use rusqlite::Connection;
use std::path::Path;

pub fn establish_connection(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;
    configure(&conn)?;
    tracing::debug!(path = %path.display(), "opened database");
    Ok(conn)
}

// Cascades only fire when SQLite enforces foreign keys, which is off by default per connection.
fn configure(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch("PRAGMA foreign_keys = ON")?;
    Ok(())
}

#[cfg(test)]
pub fn establish_test_connection() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    Ok(conn)
}

#[cfg(test)]
pub fn establish_migrated_test_connection() -> Result<Connection, StoreError> {
    let conn = establish_test_connection()?;
    crate::db::migrations::Migrator::new().run_pending(&conn)?;
    Ok(conn)
}
