use crate::db::migrations::{MigrationStatus, Migrator};
use crate::error::StoreError;
use rusqlite::Connection;

pub fn migrate_db(conn: &Connection) -> Result<Vec<&'static str>, StoreError> {
    Migrator::new().run_pending(conn)
}

pub fn rollback_db(conn: &Connection) -> Result<Vec<&'static str>, StoreError> {
    Migrator::new().rollback(conn)
}

pub fn migration_status_db(conn: &Connection) -> Result<Vec<MigrationStatus>, StoreError> {
    Migrator::new().status(conn)
}

pub fn format_status(status: &[MigrationStatus]) -> String {
    status
        .iter()
        .map(|entry| match entry.batch {
            Some(batch) => format!("Ran      [{}] {}", batch, entry.name),
            None => format!("Pending      {}", entry.name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
