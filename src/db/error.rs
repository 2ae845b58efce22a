use thiserror::Error;

/// Failures raised while turning request input into SQL fragments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("unrecognized filter(s): {}", .0.join(", "))]
    UnrecognizedFilter(Vec<String>),

    #[error("invalid value for filter '{name}': {value}")]
    InvalidFilterValue { name: &'static str, value: String },

    #[error("no fields to update")]
    NoFieldsToUpdate,
}

/// Repository-level errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("duplicate job: {0}")]
    DuplicateEntity(String),

    #[error("company not found: {0}")]
    UnknownCompany(String),

    #[error("constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("job not found: {0}")]
    NotFound(i32),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
