//! Account route definitions

use axum::{routing::get, Router};

use crate::handlers::account::{
    create_account, delete_account, get_account, list_accounts, update_account,
};
use crate::state::AppState;

/// Collection routes answer with and without a trailing slash.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/", get(list_accounts).post(create_account))
        .route(
            "/accounts/:id",
            get(get_account).put(update_account).delete(delete_account),
        )
}
