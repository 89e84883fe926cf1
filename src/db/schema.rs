use crate::error::StoreError;
use rusqlite::{Connection, OptionalExtension};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    pub default: Option<String>,
    pub primary_key: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyInfo {
    pub column: String,
    pub references_table: String,
    pub references_column: String,
    pub on_delete: String,
}

pub fn table_exists(conn: &Connection, table: &str) -> Result<bool, StoreError> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

pub fn columns(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>, StoreError> {
    if !table_exists(conn, table)? {
        return Err(StoreError::NotFound(format!("table '{}'", table)));
    }
    let mut stmt = conn.prepare("SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1) ORDER BY cid")?;
    let iter = stmt.query_map([table], |row| {
        let pk: i64 = row.get(4)?;
        Ok(ColumnInfo {
            name: row.get(0)?,
            declared_type: row.get(1)?,
            not_null: row.get(2)?,
            default: row.get(3)?,
            primary_key: pk > 0,
        })
    })?;

    let mut columns = Vec::new();
    for column in iter {
        columns.push(column?);
    }
    Ok(columns)
}

pub fn foreign_keys(conn: &Connection, table: &str) -> Result<Vec<ForeignKeyInfo>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT \"from\", \"table\", \"to\", on_delete FROM pragma_foreign_key_list(?1) ORDER BY id",
    )?;
    let iter = stmt.query_map([table], |row| {
        Ok(ForeignKeyInfo {
            column: row.get(0)?,
            references_table: row.get(1)?,
            references_column: row.get(2)?,
            on_delete: row.get(3)?,
        })
    })?;

    let mut keys = Vec::new();
    for key in iter {
        keys.push(key?);
    }
    Ok(keys)
}
