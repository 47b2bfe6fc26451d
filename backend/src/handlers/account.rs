//! Account CRUD handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::models::{AccountResponse, ApiResponse, RegisterRequest, UpdateAccountRequest};
use crate::state::AppState;

/// GET /accounts - List all accounts
#[utoipa::path(
    get,
    path = "/accounts",
    responses(
        (status = 200, description = "All accounts", body = crate::docs::AccountListEnvelope),
        (status = 500, description = "Backend error", body = crate::docs::MessageEnvelope)
    ),
    tag = "accounts"
)]
pub async fn list_accounts(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<AccountResponse>>> {
    let accounts = state.account_service.list_all().await?;
    Ok(ApiResponse::ok(accounts))
}

/// POST /accounts - Register a new account
#[utoipa::path(
    post,
    path = "/accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = crate::docs::AccountEnvelope),
        (status = 400, description = "Invalid body", body = crate::docs::MessageEnvelope),
        (status = 409, description = "Email already registered", body = crate::docs::MessageEnvelope),
        (status = 500, description = "Backend error", body = crate::docs::MessageEnvelope)
    ),
    tag = "accounts"
)]
pub async fn create_account(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<ApiResponse<AccountResponse>> {
    let account = state.account_service.register(request).await?;
    Ok(ApiResponse::success(StatusCode::CREATED, account))
}

/// GET /accounts/:id - Fetch one account
#[utoipa::path(
    get,
    path = "/accounts/{id}",
    params(("id" = String, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "The account", body = crate::docs::AccountEnvelope),
        (status = 404, description = "No such account", body = crate::docs::MessageEnvelope),
        (status = 500, description = "Backend error", body = crate::docs::MessageEnvelope)
    ),
    tag = "accounts"
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<AccountResponse>> {
    let account = state.account_service.get_by_id(&id).await?;
    Ok(ApiResponse::ok(account))
}

/// PUT /accounts/:id - Update username, email and/or password
#[utoipa::path(
    put,
    path = "/accounts/{id}",
    params(("id" = String, Path, description = "Account identifier")),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Updated account", body = crate::docs::AccountEnvelope),
        (status = 400, description = "Invalid body", body = crate::docs::MessageEnvelope),
        (status = 404, description = "No such account", body = crate::docs::MessageEnvelope),
        (status = 409, description = "Email already registered", body = crate::docs::MessageEnvelope),
        (status = 500, description = "Backend error", body = crate::docs::MessageEnvelope)
    ),
    tag = "accounts"
)]
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateAccountRequest>,
) -> ApiResult<ApiResponse<AccountResponse>> {
    let account = state.account_service.update(&id, request).await?;
    Ok(ApiResponse::ok(account))
}

/// DELETE /accounts/:id - Remove an account
#[utoipa::path(
    delete,
    path = "/accounts/{id}",
    params(("id" = String, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account deleted", body = crate::docs::MessageEnvelope),
        (status = 404, description = "No such account", body = crate::docs::MessageEnvelope),
        (status = 500, description = "Backend error", body = crate::docs::MessageEnvelope)
    ),
    tag = "accounts"
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<&'static str>> {
    state.account_service.delete(&id).await?;
    Ok(ApiResponse::ok("Successfully deleted"))
}
