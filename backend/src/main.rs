//! Account Service Server
//!
//! Wires configuration, the MongoDB store, password hashing and token
//! issuance into the HTTP router and serves it until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;

use account_service::auth::{PasswordHasher, TokenIssuer};
use account_service::config::Config;
use account_service::db;
use account_service::routes::{create_router, RouterOptions};
use account_service::services::AccountService;
use account_service::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    if let Err(e) = run(config).await {
        tracing::error!(error = ?e, "Server failed");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

async fn run(config: Config) -> anyhow::Result<()> {
    tracing::info!(environment = config.environment.as_str(), "Starting account service");

    let database = db::connect(&config)
        .await
        .context("Failed to connect to database")?;
    let store = db::account_store(database, &config)
        .await
        .context("Failed to prepare account store")?;

    let token_issuer = Arc::new(
        TokenIssuer::new(&config.jwt_secret, config.jwt_ttl_minutes)
            .context("Failed to initialise token issuer")?,
    );
    let account_service = Arc::new(AccountService::new(
        Arc::new(store),
        PasswordHasher::new(config.bcrypt_cost),
        token_issuer.clone(),
    ));

    let app_state = AppState::new(account_service, token_issuer);
    let app = create_router(app_state, RouterOptions::from_config(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check at http://{}/health", addr);

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
