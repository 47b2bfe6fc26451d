//! Authentication middleware
//!
//! Bearer token verification for protected routes.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;

use crate::auth::TokenIssuer;
use crate::error::ApiError;
use crate::models::AccountId;

/// Account identity extracted from a verified bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

/// Extractor for authenticated accounts
///
/// Verifies the JWT from the Authorization header. A missing header, a bad
/// signature and an expired token all produce the same 401 response.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(account: AuthenticatedAccount) -> impl IntoResponse {
///     format!("Hello, account {}", account.account_id)
/// }
/// ```
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedAccount
where
    Arc<TokenIssuer>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    ApiError::Unauthorized("Authorization header with Bearer token required".to_string())
                })?;

        let issuer = Arc::<TokenIssuer>::from_ref(state);
        let account_id = issuer.verify(bearer.token())?;

        Ok(AuthenticatedAccount { account_id })
    }
}
