use super::{Migration, create_table, drop_table};
use crate::error::StoreError;
use rusqlite::Connection;

pub struct CreateUsersTable;

impl Migration for CreateUsersTable {
    fn name(&self) -> &'static str {
        "create_users_table"
    }

    fn up(&self, conn: &Connection) -> Result<(), StoreError> {
        create_table(
            conn,
            "users",
            &[],
            "CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL,
                email VARCHAR(255) NOT NULL UNIQUE,
                created_at DATETIME,
                updated_at DATETIME
            )",
        )
    }

    fn down(&self, conn: &Connection) -> Result<(), StoreError> {
        drop_table(conn, "users")
    }
}
