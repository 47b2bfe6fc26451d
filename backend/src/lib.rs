//! Account Service Library
//!
//! Account registration, management and JWT login over HTTP, backed by
//! MongoDB.

pub mod auth;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
