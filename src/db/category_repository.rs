use super::{now_timestamp, parse_timestamp};
use crate::error::StoreError;
use crate::models::category::{Category, NewCategory};
use rusqlite::{Connection, OptionalExtension, Row};

const CATEGORY_COLUMNS: &str = "id, name, color, user_id, created_at, updated_at";

fn category_from_row(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        user_id: row.get(3)?,
        created_at: parse_timestamp(4, row.get(4)?)?,
        updated_at: parse_timestamp(5, row.get(5)?)?,
    })
}

pub fn create_category(conn: &Connection, category: &NewCategory) -> Result<Category, StoreError> {
    category.validate().map_err(StoreError::InvalidInput)?;

    let now = now_timestamp();
    conn.execute(
        "INSERT INTO categories (name, color, user_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
        rusqlite::params![&category.name, &category.color, category.user_id, now],
    )?;
    let id = conn.last_insert_rowid();
    get_category(conn, id)?.ok_or_else(|| StoreError::NotFound(format!("category {}", id)))
}

pub fn get_category(conn: &Connection, id: i64) -> Result<Option<Category>, StoreError> {
    let category = conn
        .query_row(
            &format!("SELECT {} FROM categories WHERE id = ?1", CATEGORY_COLUMNS),
            [id],
            category_from_row,
        )
        .optional()?;
    Ok(category)
}

pub fn get_categories_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Category>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM categories WHERE user_id = ?1 ORDER BY name ASC",
        CATEGORY_COLUMNS
    ))?;
    let iter = stmt.query_map([user_id], category_from_row)?;

    let mut categories = Vec::new();
    for category in iter {
        categories.push(category?);
    }
    Ok(categories)
}

pub fn get_all_categories(conn: &Connection) -> Result<Vec<Category>, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM categories ORDER BY id ASC", CATEGORY_COLUMNS))?;
    let iter = stmt.query_map([], category_from_row)?;

    let mut categories = Vec::new();
    for category in iter {
        categories.push(category?);
    }
    Ok(categories)
}

/// Deletes the category and every expense filed under it.
pub fn delete_category(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let rows_affected = conn.execute("DELETE FROM categories WHERE id = ?1", [id])?;
    if rows_affected == 0 {
        return Err(StoreError::NotFound(format!("category {}", id)));
    }
    tracing::debug!(category_id = id, "deleted category");
    Ok(())
}
