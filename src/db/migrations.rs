use sqlx::{Pool, Postgres};
use tracing::info;

/// Apply pending migrations from `migrations/`.
///
/// The SQL files are embedded at compile time; sqlx records applied versions,
/// so calling this on every startup is a no-op once the schema is current.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}
