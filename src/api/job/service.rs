use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::validation::ErrorResponse;
use crate::db::error::RepositoryError;
use crate::db::job_repository::JobRepository;
use crate::db::models::JobRow;
use super::models::{JobUpdate, NewJob};

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("restricted fields cannot be updated: {}", .0.join(", "))]
    RestrictedFields(Vec<&'static str>),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::RestrictedFields(_) => StatusCode::BAD_REQUEST,
            ServiceError::Repository(err) => match err {
                RepositoryError::Query(_)
                | RepositoryError::DuplicateEntity(_)
                | RepositoryError::UnknownCompany(_)
                | RepositoryError::ConstraintViolation(_) => StatusCode::BAD_REQUEST,
                RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
                RepositoryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            ServiceError::Repository(RepositoryError::Database(e)) => {
                error!("Database error: {}", e);
                ErrorResponse::message("Failed to process request", "Database error occurred")
            }
            ServiceError::Repository(RepositoryError::NotFound(id)) => {
                warn!("Job not found: {}", id);
                ErrorResponse::message("Not found", format!("Job with id {} not found", id))
            }
            ServiceError::Repository(RepositoryError::DuplicateEntity(_)) => {
                warn!("{}", self);
                ErrorResponse::message("Duplicate job", self.to_string())
            }
            _ => {
                warn!("Validation error: {}", self);
                ErrorResponse::message("Validation failed", self.to_string())
            }
        };
        HttpResponse::build(status).json(body)
    }
}

/// Job service containing business logic
pub struct JobService {
    repository: JobRepository,
}

impl JobService {
    pub fn new(repository: JobRepository) -> Self {
        Self { repository }
    }

    pub async fn create_job(&self, job: &NewJob) -> Result<JobRow, ServiceError> {
        info!(
            "Service: Creating job title={} company={}",
            job.title, job.company_handle
        );

        let row = self.repository.create(job).await?;

        info!("Service: Job created successfully with id={}", row.id);
        Ok(row)
    }

    /// Search jobs using raw query-string filters
    pub async fn list_jobs(&self, filters: &[(String, String)]) -> Result<Vec<JobRow>, ServiceError> {
        let jobs = self.repository.find_all(filters).await?;
        info!("Service: Found {} jobs for {} filter(s)", jobs.len(), filters.len());
        Ok(jobs)
    }

    pub async fn get_job(&self, id: i32) -> Result<JobRow, ServiceError> {
        Ok(self.repository.get(id).await?)
    }

    /// Update a job
    ///
    /// `id` and `company_handle` are immutable; naming either rejects the whole
    /// request before storage is touched.
    pub async fn update_job(&self, id: i32, update: &JobUpdate) -> Result<JobRow, ServiceError> {
        let restricted = update.restricted_fields();
        if !restricted.is_empty() {
            return Err(ServiceError::RestrictedFields(restricted));
        }

        let row = self.repository.update(id, update).await?;

        info!("Service: Job {} updated", id);
        Ok(row)
    }

    pub async fn delete_job(&self, id: i32) -> Result<(), ServiceError> {
        self.repository.remove(id).await?;

        info!("Service: Job {} deleted", id);
        Ok(())
    }
}
