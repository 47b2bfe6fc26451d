//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::TokenIssuer;
use crate::services::AccountService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub token_issuer: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(account_service: Arc<AccountService>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            account_service,
            token_issuer,
        }
    }
}

impl FromRef<AppState> for Arc<AccountService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.account_service.clone()
    }
}

impl FromRef<AppState> for Arc<TokenIssuer> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.token_issuer.clone()
    }
}
