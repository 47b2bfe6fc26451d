//! MongoDB account store
//!
//! One document per account in the `accounts` collection, with a unique
//! index on `email`. Every call is bounded by the configured store timeout.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};

use super::{AccountStore, StoreError};
use crate::models::{Account, AccountChanges, AccountId};

/// Collection holding account documents
pub const ACCOUNTS_COLLECTION: &str = "accounts";

const DUPLICATE_KEY: i32 = 11000;

/// Account store backed by a MongoDB collection
#[derive(Clone)]
pub struct MongoAccountStore {
    db: Database,
    accounts: Collection<Account>,
    timeout: Duration,
}

impl MongoAccountStore {
    pub fn new(db: Database, timeout: Duration) -> Self {
        let accounts = db.collection::<Account>(ACCOUNTS_COLLECTION);
        Self {
            db,
            accounts,
            timeout,
        }
    }

    /// Create the unique email index and the lookup index on `id`
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.bounded("ensure_indexes", self.accounts.create_indexes([email_index, id_index], None))
            .await?;

        tracing::info!(collection = ACCOUNTS_COLLECTION, "Account indexes ensured");
        Ok(())
    }

    /// Run a driver call under the store timeout
    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = mongodb::error::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(|e| map_driver_error(operation, e)),
            Err(_) => {
                tracing::error!(operation, timeout_ms = %self.timeout.as_millis(), "Database call timed out");
                Err(StoreError::Timeout(operation))
            }
        }
    }
}

fn id_filter(id: &AccountId) -> Document {
    doc! { "id": id.to_string() }
}

fn set_document(changes: &AccountChanges) -> Document {
    let mut set = Document::new();
    if let Some(username) = &changes.username {
        set.insert("username", username.clone());
    }
    if let Some(email) = &changes.email {
        set.insert("email", email.clone());
    }
    if let Some(password_hash) = &changes.password_hash {
        set.insert("passwordHash", password_hash.clone());
    }
    set
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn map_driver_error(operation: &'static str, err: mongodb::error::Error) -> StoreError {
    if is_duplicate_key(&err) {
        return StoreError::DuplicateEmail;
    }
    tracing::error!(operation, error = %err, "Database call failed");
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl AccountStore for MongoAccountStore {
    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        self.bounded("create", self.accounts.insert_one(&account, None))
            .await?;

        tracing::info!(account_id = %account.id, "Account created");
        Ok(account)
    }

    async fn find_all(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = self
            .bounded("find_all", async {
                let cursor = self.accounts.find(doc! {}, None).await?;
                cursor.try_collect::<Vec<Account>>().await
            })
            .await?;

        tracing::debug!(count = accounts.len(), "Listed accounts");
        Ok(accounts)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, StoreError> {
        self.bounded("find_by_id", self.accounts.find_one(id_filter(id), None))
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<Account, StoreError> {
        self.bounded(
            "find_by_email",
            self.accounts.find_one(doc! { "email": email }, None),
        )
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: &AccountId, changes: AccountChanges) -> Result<Account, StoreError> {
        // `$set` rejects an empty document.
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .bounded(
                "update",
                self.accounts.find_one_and_update(
                    id_filter(id),
                    doc! { "$set": set_document(&changes) },
                    options,
                ),
            )
            .await?
            .ok_or(StoreError::NotFound)?;

        tracing::info!(account_id = %id, "Account updated");
        Ok(updated)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), StoreError> {
        let result = self
            .bounded("delete", self.accounts.delete_one(id_filter(id), None))
            .await?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }

        tracing::info!(account_id = %id, "Account deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.bounded("ping", self.db.run_command(doc! { "ping": 1 }, None))
            .await
            .map(|_| ())
    }
}
