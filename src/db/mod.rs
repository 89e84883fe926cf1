pub mod category_repository;
pub mod connection;
pub mod expense_repository;
pub mod migrations;
pub mod schema;
pub mod user_repository;

use chrono::{NaiveDateTime, Utc};
use rusqlite::types::Type;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn now_timestamp() -> String {
    Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(idx: usize, value: Option<String>) -> rusqlite::Result<Option<NaiveDateTime>> {
    value
        .map(|raw| {
            NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
        })
        .transpose()
}
