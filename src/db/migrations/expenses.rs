use super::{Migration, create_table, drop_table};
use crate::error::StoreError;
use rusqlite::Connection;

pub struct CreateExpensesTable;

impl Migration for CreateExpensesTable {
    fn name(&self) -> &'static str {
        "create_expenses_table"
    }

    fn up(&self, conn: &Connection) -> Result<(), StoreError> {
        create_table(
            conn,
            "expenses",
            &["users", "categories"],
            "CREATE TABLE expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                title VARCHAR(255) NOT NULL,
                description TEXT,
                amount DECIMAL(10,2) NOT NULL,
                date DATE NOT NULL,
                category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
                payment_method VARCHAR(255),
                is_recurring BOOLEAN NOT NULL DEFAULT 0,
                is_anomaly BOOLEAN NOT NULL DEFAULT 0,
                created_at DATETIME,
                updated_at DATETIME
            );
            CREATE INDEX expenses_user_id_index ON expenses (user_id);
            CREATE INDEX expenses_category_id_index ON expenses (category_id);",
        )
    }

    fn down(&self, conn: &Connection) -> Result<(), StoreError> {
        drop_table(conn, "expenses")
    }
}
