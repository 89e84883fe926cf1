use crate::db::category_repository;
use crate::error::StoreError;
use rusqlite::Connection;
use std::path::Path;

pub fn export_categories_csv(conn: &Connection, path: &Path) -> Result<usize, StoreError> {
    let categories = category_repository::get_all_categories(conn)?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["id", "name", "color", "user_id"])?;
    for category in &categories {
        writer.write_record([
            category.id.to_string(),
            category.name.clone(),
            category.color.clone(),
            category.user_id.to_string(),
        ])?;
    }
    writer
        .flush()
        .map_err(|e| StoreError::Export(format!("Failed to write '{}': {}", path.display(), e)))?;

    tracing::info!(count = categories.len(), path = %path.display(), "exported categories");
    Ok(categories.len())
}
