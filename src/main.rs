//! Staff portal server.
//!
//! Main entry point that loads configuration, connects the store, and
//! starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use portal_core::config::AppConfig;
use portal_core::error::AppError;
use portal_database::Database;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `PORTAL_CONFIG` if set, otherwise from the
/// layered `config/default.toml` + `config/{PORTAL_ENV}.toml`.
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("PORTAL_CONFIG") {
        Ok(path) => AppConfig::load_file(&path),
        Err(_) => {
            let env = std::env::var("PORTAL_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        "Starting staff portal"
    );

    // ── Step 1: Connect the store (and migrate) ──────────────────
    tracing::info!(provider = ?config.database.provider, "Connecting to database...");
    let db = Database::connect(&config.database).await?;

    // ── Step 2: Build state and serve until shutdown ─────────────
    portal_api::serve(config, db).await?;

    tracing::info!("Staff portal stopped");
    Ok(())
}
