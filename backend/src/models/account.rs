//! Account models
//!
//! The stored account document, its identifier, and the request/response
//! shapes used on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Opaque, globally unique account identifier
///
/// Always serialized as its hyphenated string form so the stored `id`
/// field can be matched by string filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for AccountId {
    type Error = uuid::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Stored account document
///
/// Persisted as `{ id, username, email, passwordHash }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial update applied by the store; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password_hash.is_none()
    }

    /// Apply the changes to an in-memory record
    pub fn apply_to(&self, account: &mut Account) {
        if let Some(username) = &self.username {
            account.username = username.clone();
        }
        if let Some(email) = &self.email {
            account.email = email.clone();
        }
        if let Some(password_hash) = &self.password_hash {
            account.password_hash = password_hash.clone();
        }
    }
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Registration request
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "username must be at least 3 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

/// Login request
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

/// Update request; omitted fields are left unchanged
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 3, message = "username must be at least 3 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: Option<String>,
}

// Plaintext passwords stay out of logs.
impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for UpdateAccountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateAccountRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Account response (sanitized for API)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: AccountId,
    pub username: String,
    pub email: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
        }
    }
}

/// Successful login payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub account: AccountResponse,
    pub token: String,
    /// Expiry as a Unix timestamp (seconds)
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account {
            id: AccountId::new(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
        }
    }

    #[test]
    fn test_account_document_layout() {
        let account = sample_account();
        let value = serde_json::to_value(&account).unwrap();

        assert_eq!(value["id"], account.id.to_string());
        assert_eq!(value["passwordHash"], account.password_hash);
        assert!(value.get("password_hash").is_none());
    }

    #[test]
    fn test_response_omits_password_hash() {
        let account = sample_account();
        let id = account.id;
        let value = serde_json::to_value(AccountResponse::from(account)).unwrap();

        assert_eq!(value["id"], id.to_string());
        assert_eq!(value["username"], "alice");
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_account_id_parse() {
        let id = AccountId::new();
        assert_eq!(id.to_string().parse::<AccountId>().unwrap(), id);
        assert!("not-a-uuid".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_register_validation() {
        let valid = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_username = RegisterRequest {
            username: "al".to_string(),
            ..valid.clone()
        };
        assert!(short_username.validate().is_err());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "12345".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_update_validation_skips_absent_fields() {
        assert!(UpdateAccountRequest::default().validate().is_ok());

        let partial = UpdateAccountRequest {
            username: Some("bob".to_string()),
            ..Default::default()
        };
        assert!(partial.validate().is_ok());

        let invalid = UpdateAccountRequest {
            email: Some("bob".to_string()),
            ..Default::default()
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let request = LoginRequest {
            email: "alice@x.com".to_string(),
            password: "secret1".to_string(),
        };
        let printed = format!("{:?}", request);
        assert!(!printed.contains("secret1"));
    }

    #[test]
    fn test_changes_apply() {
        let mut account = sample_account();
        let changes = AccountChanges {
            username: Some("alice2".to_string()),
            ..Default::default()
        };
        assert!(!changes.is_empty());

        changes.apply_to(&mut account);
        assert_eq!(account.username, "alice2");
        assert_eq!(account.email, "alice@x.com");
    }
}
