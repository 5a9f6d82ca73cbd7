//! Application builder: wires router, middleware, and state into an Axum
//! app and runs it until a shutdown signal arrives.

use portal_core::config::AppConfig;
use portal_core::error::AppError;
use portal_database::Database;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> axum::Router {
    build_router(state)
}

/// Runs the HTTP server with the given configuration and store handle.
///
/// Returns once the server has drained after Ctrl+C or SIGTERM. The store
/// is closed before returning.
pub async fn serve(config: AppConfig, db: Database) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = AppState::new(config, db.clone());
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "Staff portal listening");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
    let result = server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")));

    tracing::info!(grace_seconds = grace.as_secs(), "Closing database connections");
    if tokio::time::timeout(grace, db.close()).await.is_err() {
        tracing::warn!("Database close timed out");
    }

    result
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
