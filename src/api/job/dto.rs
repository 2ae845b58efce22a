use serde::Serialize;

use crate::db::models::JobRow;

/// `{ "job": {...} }`
#[derive(Serialize)]
pub struct JobResponse {
    pub job: JobRow,
}

/// `{ "jobs": [...] }`
#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobRow>,
}

/// `{ "deleted": "Job id 7" }`
#[derive(Serialize)]
pub struct DeletedResponse {
    pub deleted: String,
}

impl DeletedResponse {
    pub fn job(id: i32) -> Self {
        DeletedResponse {
            deleted: format!("Job id {}", id),
        }
    }
}
