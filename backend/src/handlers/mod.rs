//! API handlers for the account service

pub mod account;
pub mod auth;
pub mod health;

pub use account::{create_account, delete_account, get_account, list_accounts, update_account};
pub use auth::{login, private};
pub use health::health_check;
