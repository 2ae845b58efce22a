use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::sql::SqlValue;

/// Share of equity offered with a job, between 0 and 1 inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Equity(Decimal);

impl Equity {
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Equity {
    type Error = String;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(format!("equity must be between 0 and 1, got {}", value));
        }
        Ok(Equity(value))
    }
}

impl From<Equity> for Decimal {
    fn from(equity: Equity) -> Self {
        equity.0
    }
}

/// Payload for creating a job
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct NewJob {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    #[validate(range(min = 0, message = "Salary must not be negative"))]
    pub salary: Option<i32>,

    pub equity: Option<Equity>,

    #[validate(length(
        min = 1,
        max = 25,
        message = "Company handle must be between 1 and 25 characters"
    ))]
    pub company_handle: String,
}

/// Sparse update of a job. Absent fields are left unchanged.
///
/// `id` and `company_handle` are parsed only so they can be refused with a
/// clear message; they never reach the database.
#[derive(Deserialize, Debug, Clone, Default, Validate)]
#[serde(deny_unknown_fields)]
pub struct JobUpdate {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,

    #[validate(range(min = 0, message = "Salary must not be negative"))]
    pub salary: Option<i32>,

    pub equity: Option<Equity>,

    #[serde(default, deserialize_with = "present")]
    pub id: Option<serde_json::Value>,

    #[serde(default, deserialize_with = "present")]
    pub company_handle: Option<serde_json::Value>,
}

/// Records that a field was sent, even as `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl JobUpdate {
    /// Immutable fields present in the payload
    pub fn restricted_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.id.is_some() {
            fields.push("id");
        }
        if self.company_handle.is_some() {
            fields.push("company_handle");
        }
        fields
    }

    /// Supplied fields as (field, value) pairs in a fixed order.
    pub fn changes(&self) -> Vec<(&'static str, SqlValue)> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            changes.push(("title", SqlValue::from(title.as_str())));
        }
        if let Some(salary) = self.salary {
            changes.push(("salary", SqlValue::from(salary)));
        }
        if let Some(equity) = self.equity {
            changes.push(("equity", SqlValue::from(equity.value())));
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn equity_accepts_numbers_and_strings_in_range() {
        let job: NewJob = serde_json::from_str(
            r#"{"title": "t", "salary": 1, "equity": 0.5, "company_handle": "c1"}"#,
        )
        .unwrap();
        assert_eq!(job.equity.map(|e| e.value()), Some(dec!(0.5)));

        let job: NewJob = serde_json::from_str(
            r#"{"title": "t", "equity": "1", "company_handle": "c1"}"#,
        )
        .unwrap();
        assert_eq!(job.equity.map(|e| e.value()), Some(dec!(1)));
    }

    #[test]
    fn equity_outside_unit_interval_is_rejected() {
        let result = serde_json::from_str::<NewJob>(
            r#"{"title": "t", "equity": 1.5, "company_handle": "c1"}"#,
        );
        assert!(result.is_err());

        let result = serde_json::from_str::<NewJob>(
            r#"{"title": "t", "equity": -0.1, "company_handle": "c1"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_job_validation() {
        let job = NewJob {
            title: String::new(),
            salary: Some(-5),
            equity: None,
            company_handle: "c1".to_string(),
        };
        let errors = job.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("salary"));
        assert!(!fields.contains_key("company_handle"));
    }

    #[test]
    fn update_changes_follow_field_order() {
        let update: JobUpdate =
            serde_json::from_str(r#"{"equity": 0, "title": "cx analyst"}"#).unwrap();

        assert_eq!(
            update.changes(),
            vec![
                ("title", SqlValue::from("cx analyst")),
                ("equity", SqlValue::from(dec!(0))),
            ]
        );
        assert!(update.restricted_fields().is_empty());
    }

    #[test]
    fn update_reports_restricted_fields() {
        let update: JobUpdate =
            serde_json::from_str(r#"{"id": 45, "company_handle": "evolve"}"#).unwrap();

        assert_eq!(update.restricted_fields(), vec!["id", "company_handle"]);
        assert!(update.changes().is_empty());
    }

    #[test]
    fn update_with_null_restricted_field_still_reports_it() {
        let update: JobUpdate =
            serde_json::from_str(r#"{"id": null, "title": "x"}"#).unwrap();

        assert_eq!(update.restricted_fields(), vec!["id"]);
    }

    #[test]
    fn update_rejects_unknown_fields() {
        let result = serde_json::from_str::<JobUpdate>(r#"{"location": "remote"}"#);

        assert!(result.is_err());
    }
}
