use std::path::PathBuf;

/// Owner assigned to generated categories unless overridden. Seeding creates this user when it is missing.
pub const DEFAULT_OWNER_ID: i64 = 2;

pub const DEFAULT_DATABASE_PATH: &str = "expenses.db";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub default_owner: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            default_owner: DEFAULT_OWNER_ID,
        }
    }
}
