//! OpenAPI documentation
//!
//! [`ApiDoc`] collects every handler annotated with `#[utoipa::path]`. The
//! envelope structs below exist only to describe response bodies: handlers
//! return the generic [`crate::models::ApiResponse`].

use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::handlers::auth::PrivateGreeting;
use crate::handlers::health::HealthResponse;
use crate::models::{
    AccountResponse, LoginRequest, LoginResponse, RegisterRequest, UpdateAccountRequest,
};

/// Envelope carrying a single account
#[derive(Serialize, ToSchema)]
pub struct AccountEnvelope {
    pub status: u16,
    pub message: String,
    pub data: AccountResponse,
}

/// Envelope carrying a list of accounts
#[derive(Serialize, ToSchema)]
pub struct AccountListEnvelope {
    pub status: u16,
    pub message: String,
    pub data: Vec<AccountResponse>,
}

/// Envelope carrying a login result
#[derive(Serialize, ToSchema)]
pub struct LoginEnvelope {
    pub status: u16,
    pub message: String,
    pub data: LoginResponse,
}

/// Envelope carrying a plain message (errors, deletion)
#[derive(Serialize, ToSchema)]
pub struct MessageEnvelope {
    pub status: u16,
    pub message: String,
    pub data: String,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the account API
#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerAuth),
    info(
        title = "Account API",
        description = "Account registration, management and token login."
    ),
    paths(
        crate::handlers::auth::login,
        crate::handlers::auth::private,
        crate::handlers::account::list_accounts,
        crate::handlers::account::create_account,
        crate::handlers::account::get_account,
        crate::handlers::account::update_account,
        crate::handlers::account::delete_account,
        crate::handlers::health::health_check,
    ),
    components(schemas(
        AccountResponse,
        RegisterRequest,
        LoginRequest,
        UpdateAccountRequest,
        LoginResponse,
        AccountEnvelope,
        AccountListEnvelope,
        LoginEnvelope,
        MessageEnvelope,
        PrivateGreeting,
        HealthResponse,
    )),
    tags(
        (name = "accounts", description = "Account management"),
        (name = "auth", description = "Login and token-protected routes"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
