//! In-memory account store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AccountStore, StoreError};
use crate::models::{Account, AccountChanges, AccountId};

/// Account store backed by a map, enforcing the same unique-email rule as the
/// MongoDB index
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(accounts: &HashMap<AccountId, Account>, email: &str, except: Option<&AccountId>) -> bool {
    accounts
        .values()
        .any(|a| a.email == email && Some(&a.id) != except)
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;

        if email_taken(&accounts, &account.email, None) {
            return Err(StoreError::DuplicateEmail);
        }

        accounts.insert(account.id, account.clone());
        tracing::debug!(account_id = %account.id, "Account created");
        Ok(account)
    }

    async fn find_all(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.accounts.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, StoreError> {
        self.accounts
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<Account, StoreError> {
        self.accounts
            .read()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: &AccountId, changes: AccountChanges) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;

        if let Some(email) = &changes.email {
            if email_taken(&accounts, email, Some(id)) {
                return Err(StoreError::DuplicateEmail);
            }
        }

        let account = accounts.get_mut(id).ok_or(StoreError::NotFound)?;
        changes.apply_to(account);
        Ok(account.clone())
    }

    async fn delete(&self, id: &AccountId) -> Result<(), StoreError> {
        self.accounts
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(username: &str, email: &str) -> Account {
        Account {
            id: AccountId::new(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let store = MemoryAccountStore::new();
        let created = store.create(account("alice", "alice@x.com")).await.unwrap();

        let by_id = store.find_by_id(&created.id).await.unwrap();
        assert_eq!(by_id.username, "alice");
        assert_eq!(by_id.email, "alice@x.com");

        let by_email = store.find_by_email("alice@x.com").await.unwrap();
        assert_eq!(by_email.id, created.id);

        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryAccountStore::new();
        store.create(account("alice", "alice@x.com")).await.unwrap();

        let result = store.create(account("alice2", "alice@x.com")).await;
        assert!(matches!(result, Err(StoreError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let store = MemoryAccountStore::new();
        let created = store.create(account("alice", "alice@x.com")).await.unwrap();

        let changes = AccountChanges {
            username: Some("alicia".to_string()),
            ..Default::default()
        };
        let updated = store.update(&created.id, changes).await.unwrap();

        assert_eq!(updated.username, "alicia");
        assert_eq!(updated.email, "alice@x.com");
        assert_eq!(updated.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_update_to_own_email_allowed() {
        let store = MemoryAccountStore::new();
        let created = store.create(account("alice", "alice@x.com")).await.unwrap();
        let other = store.create(account("bob", "bob@x.com")).await.unwrap();

        let same = AccountChanges {
            email: Some("alice@x.com".to_string()),
            ..Default::default()
        };
        assert!(store.update(&created.id, same).await.is_ok());

        let taken = AccountChanges {
            email: Some("alice@x.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update(&other.id, taken).await,
            Err(StoreError::DuplicateEmail)
        ));
    }

    #[tokio::test]
    async fn test_missing_records() {
        let store = MemoryAccountStore::new();
        let id = AccountId::new();

        assert!(matches!(store.find_by_id(&id).await, Err(StoreError::NotFound)));
        assert!(matches!(
            store.find_by_email("nobody@x.com").await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.update(&id, AccountChanges::default()).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(store.delete(&id).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_then_find() {
        let store = MemoryAccountStore::new();
        let created = store.create(account("alice", "alice@x.com")).await.unwrap();

        store.delete(&created.id).await.unwrap();
        assert!(matches!(
            store.find_by_id(&created.id).await,
            Err(StoreError::NotFound)
        ));
    }
}
