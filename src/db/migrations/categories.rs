use super::{Migration, create_table, drop_table};
use crate::error::StoreError;
use rusqlite::Connection;

pub struct CreateCategoriesTable;

impl Migration for CreateCategoriesTable {
    fn name(&self) -> &'static str {
        "create_categories_table"
    }

    fn up(&self, conn: &Connection) -> Result<(), StoreError> {
        create_table(
            conn,
            "categories",
            &["users"],
            "CREATE TABLE categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL,
                color VARCHAR(7) NOT NULL,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at DATETIME,
                updated_at DATETIME
            );
            CREATE INDEX categories_user_id_index ON categories (user_id);",
        )
    }

    fn down(&self, conn: &Connection) -> Result<(), StoreError> {
        drop_table(conn, "categories")
    }
}
