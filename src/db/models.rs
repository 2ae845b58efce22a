use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Database representation of a job with all fields
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// Serialized as a decimal string, e.g. `"0.05"`
    pub equity: Option<Decimal>,
    pub company_handle: String,
}
