//! Account service
//!
//! Registration, lookup, update, deletion and login on top of an
//! [`AccountStore`]. Stored records are always translated to
//! [`AccountResponse`] before leaving this layer, so password hashes never
//! reach the HTTP boundary.

use std::sync::Arc;

use thiserror::Error;

use crate::auth::{HashingError, PasswordHasher, TokenError, TokenIssuer};
use crate::models::{
    Account, AccountChanges, AccountId, AccountResponse, LoginResponse, RegisterRequest,
    UpdateAccountRequest,
};
use crate::store::{AccountStore, StoreError};

/// Account service errors
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Account not found")]
    NotFound,

    /// Unknown email and wrong password are reported identically.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Hashing(#[from] HashingError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<StoreError> for AccountError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => AccountError::NotFound,
            other => AccountError::Store(other),
        }
    }
}

/// Account service
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenIssuer>,
}

impl AccountService {
    /// Create a new AccountService
    pub fn new(store: Arc<dyn AccountStore>, hasher: PasswordHasher, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Register a new account with a freshly generated identifier
    pub async fn register(&self, request: RegisterRequest) -> Result<AccountResponse, AccountError> {
        let password_hash = self.hasher.hash(&request.password)?;

        let account = Account {
            id: AccountId::new(),
            username: request.username,
            email: request.email,
            password_hash,
        };

        let created = self.store.create(account).await?;
        tracing::info!(account_id = %created.id, "Account registered");

        Ok(created.into())
    }

    /// Authenticate by email and password and issue an access token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AccountError> {
        let account = match self.store.find_by_email(email).await {
            Ok(account) => account,
            Err(StoreError::NotFound) => {
                tracing::debug!("Login rejected: unknown email");
                return Err(AccountError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        if !self.hasher.verify(&account.password_hash, password)? {
            tracing::debug!(account_id = %account.id, "Login rejected: wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let issued = self.tokens.issue(&account.id)?;
        tracing::info!(account_id = %account.id, "Login succeeded");

        Ok(LoginResponse {
            account: account.into(),
            token: issued.token,
            exp: issued.expires_at,
        })
    }

    /// List every account
    pub async fn list_all(&self) -> Result<Vec<AccountResponse>, AccountError> {
        let accounts = self.store.find_all().await?;
        Ok(accounts.into_iter().map(AccountResponse::from).collect())
    }

    /// Fetch one account by its identifier
    pub async fn get_by_id(&self, id: &str) -> Result<AccountResponse, AccountError> {
        let id = parse_id(id)?;
        Ok(self.store.find_by_id(&id).await?.into())
    }

    /// Apply a partial update; a new password is hashed before it is stored
    pub async fn update(
        &self,
        id: &str,
        request: UpdateAccountRequest,
    ) -> Result<AccountResponse, AccountError> {
        let id = parse_id(id)?;

        let password_hash = request
            .password
            .as_deref()
            .map(|password| self.hasher.hash(password))
            .transpose()?;

        let changes = AccountChanges {
            username: request.username,
            email: request.email,
            password_hash,
        };

        let updated = self.store.update(&id, changes).await?;
        Ok(updated.into())
    }

    /// Delete an account
    pub async fn delete(&self, id: &str) -> Result<(), AccountError> {
        let id = parse_id(id)?;
        self.store.delete(&id).await?;
        tracing::info!(account_id = %id, "Account removed");
        Ok(())
    }

    /// Check the backing store is reachable
    pub async fn health(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}

/// An identifier that cannot be parsed cannot name a stored account.
fn parse_id(raw: &str) -> Result<AccountId, AccountError> {
    raw.parse::<AccountId>().map_err(|_| AccountError::NotFound)
}
