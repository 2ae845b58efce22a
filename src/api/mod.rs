pub mod auth;
pub mod health;
pub mod job;
pub mod validation;

use actix_web::web;

/// Register every route served by the application.
pub fn routes(config: &mut web::ServiceConfig) {
    config
        .configure(health::health_config)
        .configure(job::handlers::job_config);
}
