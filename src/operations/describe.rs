use crate::db::schema;
use crate::error::StoreError;
use rusqlite::Connection;

pub fn describe_table_db(conn: &Connection, table: &str) -> Result<String, StoreError> {
    let table = table.trim();
    if table.is_empty() {
        return Err(StoreError::InvalidInput("Table name cannot be empty".to_string()));
    }

    let mut lines = vec![format!("Table: {}", table)];
    for column in schema::columns(conn, table)? {
        let mut line = format!(
            "  {} {}{}",
            column.name,
            column.declared_type,
            if column.not_null { " NOT NULL" } else { "" }
        );
        if let Some(default) = &column.default {
            line.push_str(&format!(" DEFAULT {}", default));
        }
        if column.primary_key {
            line.push_str(" PRIMARY KEY");
        }
        lines.push(line);
    }
    for key in schema::foreign_keys(conn, table)? {
        lines.push(format!(
            "  FOREIGN KEY ({}) REFERENCES {}({}) ON DELETE {}",
            key.column, key.references_table, key.references_column, key.on_delete
        ));
    }
    Ok(lines.join("\n"))
}
