use super::{now_timestamp, parse_timestamp};
use crate::error::StoreError;
use crate::models::user::User;
use rusqlite::{Connection, OptionalExtension, Row};

const USER_COLUMNS: &str = "id, name, email, created_at, updated_at";

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: parse_timestamp(3, row.get(3)?)?,
        updated_at: parse_timestamp(4, row.get(4)?)?,
    })
}

pub fn create_user(conn: &Connection, name: &str, email: &str) -> Result<User, StoreError> {
    let now = now_timestamp();
    conn.execute(
        "INSERT INTO users (name, email, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
        [name, email, now.as_str()],
    )?;
    let id = conn.last_insert_rowid();
    get_user(conn, id)?.ok_or_else(|| StoreError::NotFound(format!("user {}", id)))
}

/// Inserts a user under a caller-chosen id, used when fixtures expect a fixed owner.
pub fn create_user_with_id(conn: &Connection, id: i64, name: &str, email: &str) -> Result<User, StoreError> {
    let now = now_timestamp();
    conn.execute(
        "INSERT INTO users (id, name, email, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
        rusqlite::params![id, name, email, now],
    )?;
    get_user(conn, id)?.ok_or_else(|| StoreError::NotFound(format!("user {}", id)))
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>, StoreError> {
    let user = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
            [id],
            user_from_row,
        )
        .optional()?;
    Ok(user)
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>, StoreError> {
    let user = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
            [email],
            user_from_row,
        )
        .optional()?;
    Ok(user)
}

/// Deletes the user together with every category and expense it owns.
pub fn delete_user(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let rows_affected = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
    if rows_affected == 0 {
        return Err(StoreError::NotFound(format!("user {}", id)));
    }
    tracing::debug!(user_id = id, "deleted user");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_migrated_test_connection;

    #[test]
    fn test_create_user_success() {
        let conn = establish_migrated_test_connection().unwrap();

        let user = create_user(&conn, "Ana", "ana@example.com").unwrap();
        assert!(user.id > 0);
        assert_eq!(user.name, "Ana");
        assert!(user.created_at.is_some());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_create_user_duplicate_email() {
        let conn = establish_migrated_test_connection().unwrap();
        create_user(&conn, "Ana", "ana@example.com").unwrap();

        let result = create_user(&conn, "Other", "ana@example.com");
        assert!(matches!(result, Err(StoreError::Database(_))));
        assert!(result.unwrap_err().to_string().contains("UNIQUE constraint failed"));
    }

    #[test]
    fn test_create_user_with_id() {
        let conn = establish_migrated_test_connection().unwrap();

        let user = create_user_with_id(&conn, 2, "Demo", "demo@example.com").unwrap();
        assert_eq!(user.id, 2);
        assert_eq!(get_user(&conn, 2).unwrap(), Some(user));
    }

    #[test]
    fn test_get_user_missing() {
        let conn = establish_migrated_test_connection().unwrap();
        assert!(get_user(&conn, 42).unwrap().is_none());
    }

    #[test]
    fn test_find_user_by_email() {
        let conn = establish_migrated_test_connection().unwrap();
        let user = create_user(&conn, "Ana", "ana@example.com").unwrap();

        assert_eq!(find_user_by_email(&conn, "ana@example.com").unwrap(), Some(user));
        assert!(find_user_by_email(&conn, "ben@example.com").unwrap().is_none());
    }

    #[test]
    fn test_delete_user_not_found() {
        let conn = establish_migrated_test_connection().unwrap();

        let result = delete_user(&conn, 42);
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
