//! Authentication HTTP handlers

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::middleware::AuthenticatedAccount;
use crate::models::{ApiResponse, LoginRequest, LoginResponse};
use crate::state::AppState;

/// POST /login - Exchange email and password for an access token
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = crate::docs::LoginEnvelope),
        (status = 400, description = "Invalid body", body = crate::docs::MessageEnvelope),
        (status = 401, description = "Invalid credentials", body = crate::docs::MessageEnvelope)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<ApiResponse<LoginResponse>> {
    let login = state
        .account_service
        .login(&request.email, &request.password)
        .await?;

    Ok(ApiResponse::ok(login))
}

/// Greeting returned by the protected endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct PrivateGreeting {
    #[serde(rename = "Data")]
    #[schema(value_type = String)]
    pub data: &'static str,
}

/// GET /private - Requires a valid bearer token
#[utoipa::path(
    get,
    path = "/private",
    responses(
        (status = 200, description = "Token accepted", body = PrivateGreeting),
        (status = 401, description = "Missing, invalid or expired token", body = crate::docs::MessageEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn private(account: AuthenticatedAccount) -> Json<PrivateGreeting> {
    tracing::debug!(account_id = %account.account_id, "Private endpoint accessed");
    Json(PrivateGreeting {
        data: "Hello world!",
    })
}
