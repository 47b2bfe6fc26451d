//! Route definitions for the account API

mod account;
mod auth;

pub use account::account_routes;
pub use auth::auth_routes;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::docs::ApiDoc;
use crate::handlers::health_check;
use crate::middleware;
use crate::state::AppState;

/// Router switches derived from configuration
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Mount Swagger UI at `/swagger` and the document at `/api-docs/openapi.json`
    pub enable_swagger: bool,
    /// Comma-separated origins; permissive CORS when unset
    pub cors_allowed_origins: Option<String>,
    /// Send `Strict-Transport-Security`
    pub hsts: bool,
}

impl RouterOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enable_swagger: config.enable_swagger,
            cors_allowed_origins: config.cors_allowed_origins.clone(),
            hsts: config.environment.is_production(),
        }
    }
}

/// Assemble the full application router with its middleware stack
pub fn create_router(state: AppState, options: RouterOptions) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes())
        .merge(account_routes())
        .with_state(state);

    if options.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()));
        tracing::info!("Swagger UI enabled at /swagger");
    }

    if options.hsts {
        app = app.layer(axum::middleware::from_fn(middleware::hsts_header));
    }

    app.layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(configure_cors(options.cors_allowed_origins.as_deref()))
}

fn configure_cors(allowed_origins: Option<&str>) -> CorsLayer {
    let allowed_origins = allowed_origins.unwrap_or_default();

    if allowed_origins.trim().is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}
