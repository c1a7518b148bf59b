//! Clubsite
//!
//! Admin backend for a student organization website. Board members are kept
//! in one flat display order and grouped into teams on the public page.
//!
//! # Layout
//! - `domain`: members, team layout, domain errors
//! - `repository`: SQLite storage and the transactional ordering operations
//! - `routes`: the HTTP surface, reads public and writes behind an admin session
//!
//! The ordering rules themselves live in the `group-order` crate.

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{AppError, StartupError};
pub use repository::init_db;
pub use routes::build_router;
pub use state::AppState;

use tokio::net::TcpListener;
use tokio::signal;

/// Load configuration, open the database and serve until a shutdown signal.
pub async fn run() -> Result<(), StartupError> {
    let config = Config::load()?;
    let log_file = rolling_logger::init_logger(&config.log_dir, "clubsite")?;
    tracing::info!(log_file = %log_file.display(), "logger initialized");
    config.log_summary();

    let db = init_db(&config.db_path).await?;
    rolling_logger::info("database ready");

    let address = config.address();
    let app = build_router(AppState::new(config, &db));

    let listener = TcpListener::bind(&address).await?;
    rolling_logger::info(&format!("server listening on {address}"));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    rolling_logger::info("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
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
}
