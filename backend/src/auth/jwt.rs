//! JWT token generation and validation
//!
//! Handles creation and verification of account access tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::AccountId;

/// JWT-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token signing failed: {0}")]
    SigningFailed(String),

    /// Bad signature, expired, malformed or foreign token. Deliberately carries no detail.
    #[error("Invalid or expired token")]
    Unauthorized,
}

/// JWT claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// A freshly issued token together with its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

/// Issues and verifies HS256 access tokens
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer from the configured secret and lifetime
    pub fn new(secret: &str, ttl_minutes: i64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::SigningFailed(
                "signing secret is empty".to_string(),
            ));
        }

        let ttl = Duration::try_minutes(ttl_minutes)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| {
                TokenError::SigningFailed(format!("invalid token lifetime: {} minutes", ttl_minutes))
            })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    /// Issue a token for an account, expiring one TTL from now
    pub fn issue(&self, account_id: &AccountId) -> Result<IssuedToken, TokenError> {
        self.issue_at(account_id, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        account_id: &AccountId,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::SigningFailed("token expiry out of range".to_string()))?;

        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }

    /// Verify a token and return the account it was issued for
    pub fn verify(&self, token: &str) -> Result<AccountId, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`
    ///
    /// Expiry is checked here with zero leeway instead of by `jsonwebtoken`,
    /// whose default validation allows a minute of clock skew.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AccountId, TokenError> {
        let mut validation = Validation::default();
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            TokenError::Unauthorized
        })?;

        if now.timestamp() >= token_data.claims.exp {
            tracing::debug!(exp = token_data.claims.exp, "Token expired");
            return Err(TokenError::Unauthorized);
        }

        token_data
            .claims
            .sub
            .parse::<AccountId>()
            .map_err(|_| TokenError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(secret: &str) -> TokenIssuer {
        TokenIssuer::new(secret, 30).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = issuer("test-secret-key");
        let account_id = AccountId::new();

        let issued = issuer.issue(&account_id).unwrap();
        assert!(!issued.token.is_empty());
        assert!(issued.expires_at > Utc::now().timestamp());

        let verified = issuer.verify(&issued.token).unwrap();
        assert_eq!(verified, account_id);
    }

    #[test]
    fn test_expiry_window() {
        let issuer = issuer("test-secret-key");
        let account_id = AccountId::new();
        let issued_at = Utc::now();

        let issued = issuer.issue_at(&account_id, issued_at).unwrap();
        assert_eq!(
            issued.expires_at,
            (issued_at + Duration::minutes(30)).timestamp()
        );

        let at_29 = issued_at + Duration::minutes(29);
        assert_eq!(issuer.verify_at(&issued.token, at_29).unwrap(), account_id);

        let at_31 = issued_at + Duration::minutes(31);
        assert!(matches!(
            issuer.verify_at(&issued.token, at_31),
            Err(TokenError::Unauthorized)
        ));
    }

    #[test]
    fn test_invalid_token() {
        let result = issuer("test-secret-key").verify("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Unauthorized)));
    }

    #[test]
    fn test_wrong_secret() {
        let account_id = AccountId::new();
        let issued = issuer("secret1").issue(&account_id).unwrap();

        let result = issuer("secret2").verify(&issued.token);
        assert!(matches!(result, Err(TokenError::Unauthorized)));
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let claims = Claims {
            sub: "not-an-id".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key"),
        )
        .unwrap();

        let result = issuer("test-secret-key").verify(&token);
        assert!(matches!(result, Err(TokenError::Unauthorized)));
    }

    #[test]
    fn test_out_of_range_lifetime_rejected() {
        for minutes in [i64::MAX, 0, -1] {
            assert!(
                matches!(
                    TokenIssuer::new("test-secret-key", minutes),
                    Err(TokenError::SigningFailed(_))
                ),
                "minutes {minutes}"
            );
        }
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            TokenIssuer::new("", 30),
            Err(TokenError::SigningFailed(_))
        ));
    }
}
