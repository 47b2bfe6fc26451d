//! Account persistence
//!
//! A single async capability trait over the account collection, with a
//! MongoDB adapter for production and an in-memory adapter for tests and
//! local runs.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Account, AccountChanges, AccountId};

pub mod memory;
pub mod mongo;

pub use memory::MemoryAccountStore;
pub use mongo::MongoAccountStore;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Account not found")]
    NotFound,

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Database operation '{0}' timed out")]
    Timeout(&'static str),

    #[error("Database error: {0}")]
    Backend(String),
}

/// Persistence operations for accounts
///
/// Dropping a returned future cancels the call. Implementations never retry.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account; its identifier is already assigned.
    async fn create(&self, account: Account) -> Result<Account, StoreError>;

    /// Every stored account.
    async fn find_all(&self) -> Result<Vec<Account>, StoreError>;

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Account, StoreError>;

    /// Apply a partial update and return the post-update record.
    async fn update(&self, id: &AccountId, changes: AccountChanges) -> Result<Account, StoreError>;

    async fn delete(&self, id: &AccountId) -> Result<(), StoreError>;

    /// Backend health probe.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
