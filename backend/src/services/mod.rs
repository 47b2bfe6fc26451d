//! Business logic services for the account service

pub mod account;

pub use account::{AccountError, AccountService};
