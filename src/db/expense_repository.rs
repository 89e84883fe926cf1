use super::{now_timestamp, parse_timestamp};
use crate::error::StoreError;
use crate::models::expense::{Expense, NewExpense};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::str::FromStr;

// amount has NUMERIC affinity, so it is read back as text and rescaled to two places.
const EXPENSE_COLUMNS: &str = "id, user_id, title, description, CAST(amount AS TEXT), date, category_id, \
     payment_method, is_recurring, is_anomaly, created_at, updated_at";

fn expense_from_row(row: &Row) -> rusqlite::Result<Expense> {
    let amount_str: String = row.get(4)?;
    let mut amount = Decimal::from_str(&amount_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
    amount.rescale(2);

    let date_str: String = row.get(5)?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Expense {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        amount,
        date,
        category_id: row.get(6)?,
        payment_method: row.get(7)?,
        is_recurring: row.get(8)?,
        is_anomaly: row.get(9)?,
        created_at: parse_timestamp(10, row.get(10)?)?,
        updated_at: parse_timestamp(11, row.get(11)?)?,
    })
}

pub fn create_expense(conn: &Connection, expense: &NewExpense) -> Result<Expense, StoreError> {
    expense.validate().map_err(StoreError::InvalidInput)?;

    let now = now_timestamp();
    conn.execute(
        "INSERT INTO expenses (user_id, title, description, amount, date, category_id, payment_method, \
         is_recurring, is_anomaly, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
        rusqlite::params![
            expense.user_id,
            &expense.title,
            &expense.description,
            expense.amount.round_dp(2).to_string(),
            expense.date.to_string(),
            expense.category_id,
            &expense.payment_method,
            expense.is_recurring,
            expense.is_anomaly,
            now,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_expense(conn, id)?.ok_or_else(|| StoreError::NotFound(format!("expense {}", id)))
}

pub fn get_expense(conn: &Connection, id: i64) -> Result<Option<Expense>, StoreError> {
    let expense = conn
        .query_row(
            &format!("SELECT {} FROM expenses WHERE id = ?1", EXPENSE_COLUMNS),
            [id],
            expense_from_row,
        )
        .optional()?;
    Ok(expense)
}

pub fn get_expenses_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Expense>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM expenses WHERE user_id = ?1 ORDER BY date DESC, id DESC",
        EXPENSE_COLUMNS
    ))?;
    let iter = stmt.query_map([user_id], expense_from_row)?;

    let mut expenses = Vec::new();
    for expense in iter {
        expenses.push(expense?);
    }
    Ok(expenses)
}

/// Replaces every mutable field of an expense and refreshes `updated_at`.
pub fn update_expense(conn: &Connection, id: i64, expense: &NewExpense) -> Result<Expense, StoreError> {
    expense.validate().map_err(StoreError::InvalidInput)?;

    let rows_affected = conn.execute(
        "UPDATE expenses SET user_id = ?1, title = ?2, description = ?3, amount = ?4, date = ?5, \
         category_id = ?6, payment_method = ?7, is_recurring = ?8, is_anomaly = ?9, updated_at = ?10 \
         WHERE id = ?11",
        rusqlite::params![
            expense.user_id,
            &expense.title,
            &expense.description,
            expense.amount.round_dp(2).to_string(),
            expense.date.to_string(),
            expense.category_id,
            &expense.payment_method,
            expense.is_recurring,
            expense.is_anomaly,
            now_timestamp(),
            id,
        ],
    )?;
    if rows_affected == 0 {
        return Err(StoreError::NotFound(format!("expense {}", id)));
    }
    get_expense(conn, id)?.ok_or_else(|| StoreError::NotFound(format!("expense {}", id)))
}

pub fn delete_expense(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let rows_affected = conn.execute("DELETE FROM expenses WHERE id = ?1", [id])?;
    if rows_affected == 0 {
        return Err(StoreError::NotFound(format!("expense {}", id)));
    }
    Ok(())
}
