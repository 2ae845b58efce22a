use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{postgres::PgArguments, query::QueryAs, Postgres};

use crate::db::error::QueryError;

/// A value bound positionally to a `$n` placeholder.
///
/// Nullable variants keep their Rust type so Postgres receives a typed NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(Option<i32>),
    BigInt(i64),
    Decimal(Option<Decimal>),
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Integer(Some(value))
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::BigInt(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        SqlValue::Decimal(Some(value))
    }
}

/// SET clause for an UPDATE plus the values for its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// Build the SET clause for a partial update.
///
/// Fields are numbered `$1..$n` in the order given. Column names come from
/// `column_map`; a field missing from the map is used as its own column name.
///
/// ```text
/// [("firstName", "Aliya"), ("age", 32)], {firstName: first_name}
///   => "first_name"=$1, "age"=$2   values: ["Aliya", 32]
/// ```
pub fn sql_for_partial_update(
    fields: Vec<(&str, SqlValue)>,
    column_map: &HashMap<&str, &str>,
) -> Result<SetClause, QueryError> {
    if fields.is_empty() {
        return Err(QueryError::NoFieldsToUpdate);
    }

    let mut assignments = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());

    for (idx, (field, value)) in fields.into_iter().enumerate() {
        let column = column_map.get(field).copied().unwrap_or(field);
        assignments.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value);
    }

    Ok(SetClause {
        sql: assignments.join(", "),
        values,
    })
}

/// Bind `values` onto `query` in order.
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: Vec<SqlValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Integer(v) => query.bind(v),
            SqlValue::BigInt(v) => query.bind(v),
            SqlValue::Decimal(v) => query.bind(v),
        };
    }
    query
}
