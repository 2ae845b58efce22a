use actix_web::{
    delete, get, patch, post,
    web::{scope, Data, Path, Query, ServiceConfig},
    HttpResponse,
};
use actix_web_validator::Json;

use crate::api::auth::AdminUser;
use super::dto::{DeletedResponse, JobListResponse, JobResponse};
use super::models::{JobUpdate, NewJob};
use super::service::{JobService, ServiceError};

/// POST /jobs { title, salary, equity, company_handle } => 201 { job }
#[post("")]
async fn create_job(
    _admin: AdminUser,
    service: Data<JobService>,
    job: Json<NewJob>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.create_job(&job).await?;
    Ok(HttpResponse::Created().json(JobResponse { job }))
}

/// GET /jobs?title=&minSalary=&hasEquity= => { jobs }
#[get("")]
async fn list_jobs(
    service: Data<JobService>,
    filters: Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ServiceError> {
    let jobs = service.list_jobs(&filters).await?;
    Ok(HttpResponse::Ok().json(JobListResponse { jobs }))
}

/// GET /jobs/{id} => { job }
#[get("/{id}")]
async fn get_job(service: Data<JobService>, path: Path<i32>) -> Result<HttpResponse, ServiceError> {
    let job = service.get_job(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JobResponse { job }))
}

/// PATCH /jobs/{id} { title?, salary?, equity? } => { job }
#[patch("/{id}")]
async fn update_job(
    _admin: AdminUser,
    service: Data<JobService>,
    path: Path<i32>,
    update: Json<JobUpdate>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.update_job(path.into_inner(), &update).await?;
    Ok(HttpResponse::Ok().json(JobResponse { job }))
}

/// DELETE /jobs/{id} => { deleted: "Job id <id>" }
#[delete("/{id}")]
async fn delete_job(
    _admin: AdminUser,
    service: Data<JobService>,
    path: Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    let id = path.into_inner();
    service.delete_job(id).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse::job(id)))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("jobs")
            .service(create_job)
            .service(list_jobs)
            .service(get_job)
            .service(update_job)
            .service(delete_job),
    );
}
