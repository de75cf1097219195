//! Query parameters and generic row decoding.
//!
//! Read paths return rows as JSON maps keyed by column name so callers can
//! inspect arbitrary columns, then deserialize into typed rows where needed.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use sqlx::mysql::{MySql, MySqlArguments, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, Row};

use crate::error::GatewayError;

/// One result row: column name to value.
pub type RowMap = Map<String, Value>;

/// Layout used when a DATETIME column is rendered into a row map.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A positional query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    UInt(u64),
    Int(i64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl From<u64> for SqlParam {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDateTime> for SqlParam {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

/// Builds `?, ?, ?` for an `IN (...)` list of `count` items.
pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

pub(crate) fn bind_params<'q>(
    sql: &'q str,
    params: &'q [SqlParam],
) -> Query<'q, MySql, MySqlArguments> {
    params.iter().fold(sqlx::query(sql), |query, param| match param {
        SqlParam::UInt(v) => query.bind(*v),
        SqlParam::Int(v) => query.bind(*v),
        SqlParam::Text(v) => query.bind(v.as_str()),
        SqlParam::DateTime(v) => query.bind(*v),
    })
}

pub(crate) fn decode_row(row: &MySqlRow) -> Result<RowMap, GatewayError> {
    let mut map = RowMap::new();
    for column in row.columns() {
        let value =
            decode_column(row, column.ordinal()).map_err(|reason| GatewayError::Decode {
                column: column.name().to_owned(),
                reason,
            })?;
        map.insert(column.name().to_owned(), value);
    }
    Ok(map)
}

// try_get checks type compatibility before decoding, so probing candidate types
// in order is cheap and never misreads a value.
fn decode_column(row: &MySqlRow, index: usize) -> Result<Value, String> {
    if let Ok(v) = row.try_get::<Option<u64>, _>(index) {
        return Ok(v.map(Value::from).unwrap_or(Value::Null));
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
        return Ok(v.map(Value::from).unwrap_or(Value::Null));
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
        return Ok(v.map(Value::from).unwrap_or(Value::Null));
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(index) {
        return Ok(v.map(Value::String).unwrap_or(Value::Null));
    }
    if let Ok(v) = row.try_get::<Option<NaiveDateTime>, _>(index) {
        return Ok(v
            .map(|dt| Value::String(dt.format(DATETIME_FORMAT).to_string()))
            .unwrap_or(Value::Null));
    }
    match row.try_get::<Option<Vec<u8>>, _>(index) {
        Ok(v) => Ok(v
            .map(|bytes| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
            .unwrap_or(Value::Null)),
        Err(e) => Err(e.to_string()),
    }
}

/// Reads the `count` column of a single-row `COUNT(*) AS count` result.
pub(crate) fn count_from(rows: &[RowMap]) -> Result<u64, GatewayError> {
    rows.first()
        .and_then(|row| row.get("count"))
        .and_then(Value::as_u64)
        .ok_or_else(|| GatewayError::Unexpected("missing or non-numeric 'count' column".to_owned()))
}
