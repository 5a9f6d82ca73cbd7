//! Database migration command.

use portal_core::config::{AppConfig, DatabaseProvider};
use portal_core::error::AppError;
use portal_database::DatabasePool;

use crate::output;

/// Apply every pending migration.
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    if config.database.provider == DatabaseProvider::Memory {
        return Err(AppError::configuration(
            "Migrations only apply to the postgres provider",
        ));
    }

    println!("Running database migrations...");
    let pool = DatabasePool::connect(&config.database).await?;
    let result = portal_database::migration::run_migrations(pool.pool()).await;
    pool.close().await;
    result?;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
