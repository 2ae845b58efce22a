use std::process::ExitCode;

use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Duration;
use clap::Parser;
use tracing::{error, info};

use jobly::api::{self, auth::TokenKeys, job::JobService, validation};
use jobly::cli::{Cli, Command};
use jobly::config::Config;
use jobly::db::{self, job_repository::JobRepository};
use jobly::shutdown::ShutdownCoordinator;

#[actix_web::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = jobly::logging::init(&config.log_dir) {
        eprintln!("Failed to initialize logging in {}: {}", config.log_dir, e);
        return ExitCode::FAILURE;
    }

    let keys = TokenKeys::new(&config.secret_key, Duration::hours(config.token_ttl_hours));

    let result = match cli.command() {
        Command::Serve => serve(config, keys).await,
        Command::Migrate => migrate(&config).await,
        Command::Token { username, admin } => keys
            .issue(username, *admin)
            .map(|token| println!("{}", token))
            .map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn migrate(config: &Config) -> Result<(), String> {
    let pool = db::connection::get_connection(&config.database_url, config.max_db_connections)
        .await
        .map_err(|e| format!("Failed to connect to database: {}", e))?;
    db::migrations::run_migrations(&pool)
        .await
        .map_err(|e| format!("Failed to run database migrations: {}", e))?;
    pool.close().await;
    Ok(())
}

async fn serve(config: Config, keys: TokenKeys) -> Result<(), String> {
    let pool = db::connection::get_connection(&config.database_url, config.max_db_connections)
        .await
        .map_err(|e| format!("Failed to connect to database: {}", e))?;

    info!("Starting jobly");
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.max_db_connections);
    info!("Database connection pool established");

    db::migrations::run_migrations(&pool)
        .await
        .map_err(|e| format!("Failed to run database migrations: {}", e))?;

    let keys = web::Data::new(keys);
    let job_service = web::Data::new(JobService::new(JobRepository::new(pool.clone())));
    let server_pool = web::Data::new(pool.clone());
    let max_payload_size = config.max_payload_size;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(server_pool.clone())
            .app_data(job_service.clone())
            .app_data(keys.clone())
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(validation::json_config().limit(max_payload_size))
            .app_data(validation::query_config())
            .app_data(validation::path_config())
            .configure(api::routes)
    })
    .bind((config.bind_address.as_str(), config.port))
    .map_err(|e| format!("Failed to bind {}:{}: {}", config.bind_address, config.port, e))?
    .run();

    info!("Server listening on http://{}:{}", config.bind_address, config.port);

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, pool)
        .wait_for_shutdown()
        .await
        .map_err(|e| format!("Shutdown failed: {}", e))
}
