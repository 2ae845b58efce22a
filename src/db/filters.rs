use crate::db::error::QueryError;
use crate::db::sql::SqlValue;

/// Filter names accepted by the job search
pub const RECOGNIZED_FILTERS: [&str; 3] = ["title", "minSalary", "hasEquity"];

/// Equity constraint requested through `hasEquity`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquityFilter {
    /// `hasEquity=true`: equity above zero
    NonZero,
    /// `hasEquity=false`: equity exactly zero
    Zero,
}

/// Parsed job search filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i64>,
    pub has_equity: Option<EquityFilter>,
}

/// WHERE clause body (without the keyword) and its bound parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl WhereClause {
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

impl JobFilter {
    /// Parse raw query-string pairs.
    ///
    /// Every key is checked before anything is parsed, and all unknown keys
    /// are reported together. Empty values count as absent. When a key is
    /// repeated the last value wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, QueryError> {
        let unrecognized: Vec<String> = pairs
            .iter()
            .map(|(name, _)| name)
            .filter(|name| !RECOGNIZED_FILTERS.contains(&name.as_str()))
            .cloned()
            .collect();
        if !unrecognized.is_empty() {
            return Err(QueryError::UnrecognizedFilter(unrecognized));
        }

        let mut filter = JobFilter::default();
        for (name, value) in pairs {
            if value.is_empty() {
                continue;
            }
            match name.as_str() {
                "title" => filter.title = Some(value.clone()),
                "minSalary" => {
                    let min_salary = value.trim().parse::<i64>().map_err(|_| {
                        QueryError::InvalidFilterValue {
                            name: "minSalary",
                            value: value.clone(),
                        }
                    })?;
                    filter.min_salary = Some(min_salary);
                }
                "hasEquity" => {
                    filter.has_equity = match value.as_str() {
                        "true" => Some(EquityFilter::NonZero),
                        "false" => Some(EquityFilter::Zero),
                        _ => None,
                    }
                }
                _ => {}
            }
        }

        Ok(filter)
    }

    /// Build the WHERE clause in the order title, minSalary, hasEquity.
    pub fn to_where_clause(&self) -> WhereClause {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(title) = &self.title {
            params.push(SqlValue::from(title.as_str()));
            conditions.push(format!("title ILIKE '%' || ${} || '%'", params.len()));
        }

        if let Some(min_salary) = self.min_salary {
            params.push(SqlValue::from(min_salary));
            conditions.push(format!("salary >= ${}", params.len()));
        }

        match self.has_equity {
            Some(EquityFilter::NonZero) => conditions.push("equity > 0".to_string()),
            Some(EquityFilter::Zero) => conditions.push("equity = 0".to_string()),
            None => {}
        }

        WhereClause {
            sql: conditions.join(" AND "),
            params,
        }
    }
}

/// Validate and translate raw search filters in one step.
pub fn translate_filters(pairs: &[(String, String)]) -> Result<WhereClause, QueryError> {
    Ok(JobFilter::from_pairs(pairs)?.to_where_clause())
}
