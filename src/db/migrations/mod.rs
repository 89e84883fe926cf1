mod categories;
mod expenses;
mod users;

pub use categories::CreateCategoriesTable;
pub use expenses::CreateExpensesTable;
pub use users::CreateUsersTable;

use crate::db::schema;
use crate::error::StoreError;
use rusqlite::Connection;

/// A reversible schema change.
pub trait Migration {
    fn name(&self) -> &'static str;
    fn up(&self, conn: &Connection) -> Result<(), StoreError>;
    fn down(&self, conn: &Connection) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MigrationStatus {
    pub name: &'static str,
    pub batch: Option<i64>,
}

/// Creates `table` from `ddl` after checking it is absent and that every table it references exists.
fn create_table(
    conn: &Connection,
    table: &str,
    references: &[&str],
    ddl: &str,
) -> Result<(), StoreError> {
    if schema::table_exists(conn, table)? {
        return Err(StoreError::SchemaConflict(table.to_string()));
    }
    for referenced in references {
        if !schema::table_exists(conn, referenced)? {
            return Err(StoreError::ForeignKeyViolation(format!(
                "table '{}' references missing table '{}'",
                table, referenced
            )));
        }
    }
    conn.execute_batch(ddl)?;
    Ok(())
}

fn drop_table(conn: &Connection, table: &str) -> Result<(), StoreError> {
    conn.execute_batch(&format!("DROP TABLE IF EXISTS {}", table))?;
    Ok(())
}

pub struct Migrator {
    migrations: Vec<Box<dyn Migration>>,
}

impl Migrator {
    pub fn new() -> Self {
        Self::with_migrations(vec![
            Box::new(CreateUsersTable),
            Box::new(CreateCategoriesTable),
            Box::new(CreateExpensesTable),
        ])
    }

    pub fn with_migrations(migrations: Vec<Box<dyn Migration>>) -> Self {
        Self { migrations }
    }

    fn ensure_repository(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS migrations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                migration VARCHAR(255) NOT NULL UNIQUE,
                batch INTEGER NOT NULL
            )",
        )?;
        Ok(())
    }

    fn ran(conn: &Connection) -> Result<Vec<(String, i64)>, StoreError> {
        if !schema::table_exists(conn, "migrations")? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare("SELECT migration, batch FROM migrations ORDER BY id ASC")?;
        let iter = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;

        let mut ran = Vec::new();
        for entry in iter {
            ran.push(entry?);
        }
        Ok(ran)
    }

    /// Applies every migration not yet recorded as one new batch. Nothing is kept if any step fails.
    pub fn run_pending(&self, conn: &Connection) -> Result<Vec<&'static str>, StoreError> {
        let tx = conn.unchecked_transaction()?;
        Self::ensure_repository(&tx)?;

        let ran = Self::ran(&tx)?;
        let batch = ran.iter().map(|(_, batch)| *batch).max().unwrap_or(0) + 1;

        let mut applied = Vec::new();
        for migration in &self.migrations {
            if ran.iter().any(|(name, _)| name == migration.name()) {
                continue;
            }
            migration.up(&tx)?;
            tx.execute(
                "INSERT INTO migrations (migration, batch) VALUES (?1, ?2)",
                rusqlite::params![migration.name(), batch],
            )?;
            tracing::info!(migration = migration.name(), batch, "migrated");
            applied.push(migration.name());
        }

        tx.commit()?;
        if applied.is_empty() {
            tracing::info!("nothing to migrate");
        }
        Ok(applied)
    }

    /// Reverses the most recent batch, newest migration first.
    pub fn rollback(&self, conn: &Connection) -> Result<Vec<&'static str>, StoreError> {
        let ran = Self::ran(conn)?;
        let Some(last_batch) = ran.iter().map(|(_, batch)| *batch).max() else {
            tracing::info!("nothing to rollback");
            return Ok(Vec::new());
        };

        let tx = conn.unchecked_transaction()?;
        let mut rolled_back = Vec::new();
        for (name, _) in ran.iter().rev().filter(|(_, batch)| *batch == last_batch) {
            let migration = self
                .migrations
                .iter()
                .find(|m| m.name() == name)
                .ok_or_else(|| StoreError::NotFound(format!("migration '{}'", name)))?;
            migration.down(&tx)?;
            tx.execute("DELETE FROM migrations WHERE migration = ?1", [name])?;
            tracing::info!(migration = migration.name(), batch = last_batch, "rolled back");
            rolled_back.push(migration.name());
        }
        tx.commit()?;
        Ok(rolled_back)
    }

    pub fn status(&self, conn: &Connection) -> Result<Vec<MigrationStatus>, StoreError> {
        let ran = Self::ran(conn)?;
        Ok(self
            .migrations
            .iter()
            .map(|migration| MigrationStatus {
                name: migration.name(),
                batch: ran
                    .iter()
                    .find(|(name, _)| name == migration.name())
                    .map(|(_, batch)| *batch),
            })
            .collect())
    }
}

impl Default for Migrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;

    #[test]
    fn test_run_pending_applies_all_in_one_batch() {
        let conn = establish_test_connection().unwrap();
        let migrator = Migrator::new();

        let applied = migrator.run_pending(&conn).unwrap();
        assert_eq!(
            applied,
            vec!["create_users_table", "create_categories_table", "create_expenses_table"]
        );

        let status = migrator.status(&conn).unwrap();
        assert!(status.iter().all(|s| s.batch == Some(1)));
        assert!(schema::table_exists(&conn, "expenses").unwrap());
    }

    #[test]
    fn test_run_pending_twice_is_noop() {
        let conn = establish_test_connection().unwrap();
        let migrator = Migrator::new();

        migrator.run_pending(&conn).unwrap();
        let applied = migrator.run_pending(&conn).unwrap();
        assert!(applied.is_empty());
    }

    #[test]
    fn test_status_before_any_run_is_pending() {
        let conn = establish_test_connection().unwrap();
        let status = Migrator::new().status(&conn).unwrap();

        assert_eq!(status.len(), 3);
        assert!(status.iter().all(|s| s.batch.is_none()));
        assert!(!schema::table_exists(&conn, "migrations").unwrap());
    }

    #[test]
    fn test_rollback_reverses_last_batch_only() {
        let conn = establish_test_connection().unwrap();
        Migrator::with_migrations(vec![Box::new(CreateUsersTable), Box::new(CreateCategoriesTable)])
            .run_pending(&conn)
            .unwrap();

        let migrator = Migrator::new();
        assert_eq!(migrator.run_pending(&conn).unwrap(), vec!["create_expenses_table"]);

        let rolled_back = migrator.rollback(&conn).unwrap();
        assert_eq!(rolled_back, vec!["create_expenses_table"]);
        assert!(!schema::table_exists(&conn, "expenses").unwrap());
        assert!(schema::table_exists(&conn, "categories").unwrap());

        let rolled_back = migrator.rollback(&conn).unwrap();
        assert_eq!(rolled_back, vec!["create_categories_table", "create_users_table"]);
        assert!(!schema::table_exists(&conn, "users").unwrap());
    }

    #[test]
    fn test_rollback_with_nothing_run() {
        let conn = establish_test_connection().unwrap();
        let rolled_back = Migrator::new().rollback(&conn).unwrap();
        assert!(rolled_back.is_empty());
    }

    #[test]
    fn test_failed_batch_leaves_nothing_behind() {
        let conn = establish_test_connection().unwrap();
        conn.execute("CREATE TABLE expenses (id INTEGER PRIMARY KEY)", []).unwrap();

        let result = Migrator::new().run_pending(&conn);
        assert!(matches!(result, Err(StoreError::SchemaConflict(ref t)) if t == "expenses"));

        assert!(!schema::table_exists(&conn, "users").unwrap());
        assert!(!schema::table_exists(&conn, "categories").unwrap());
        assert!(!schema::table_exists(&conn, "migrations").unwrap());
    }

    #[test]
    fn test_rerun_after_rollback() {
        let conn = establish_test_connection().unwrap();
        let migrator = Migrator::new();

        migrator.run_pending(&conn).unwrap();
        migrator.rollback(&conn).unwrap();
        let applied = migrator.run_pending(&conn).unwrap();

        assert_eq!(applied.len(), 3);
        assert!(migrator.status(&conn).unwrap().iter().all(|s| s.batch == Some(1)));
    }
}
