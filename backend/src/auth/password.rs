//! Password hashing
//!
//! bcrypt hashing and verification for account credentials.

use thiserror::Error;

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashing errors
#[derive(Error, Debug)]
pub enum HashingError {
    #[error("Password exceeds {MAX_PASSWORD_BYTES} bytes")]
    PasswordTooLong,

    #[error("Failed to hash password: {0}")]
    HashFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Salted, adaptive password hasher
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt work factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password
    ///
    /// Passwords longer than [`MAX_PASSWORD_BYTES`] are rejected instead of
    /// being silently truncated.
    pub fn hash(&self, password: &str) -> Result<String, HashingError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(HashingError::PasswordTooLong);
        }

        bcrypt::hash(password, self.cost).map_err(|e| HashingError::HashFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored hash
    ///
    /// # Returns
    /// * `Ok(true)` - password matches
    /// * `Ok(false)` - password does not match
    /// * `Err(HashingError)` - the stored hash cannot be parsed
    pub fn verify(&self, hash: &str, password: &str) -> Result<bool, HashingError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }

        bcrypt::verify(password, hash).map_err(|e| HashingError::MalformedHash(e.to_string()))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the tests fast.
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("secret1").unwrap();

        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$2"));
        assert!(hasher.verify(&hash, "secret1").unwrap());
    }

    #[test]
    fn test_wrong_password() {
        let hasher = hasher();
        let hash = hasher.hash("secret1").unwrap();

        assert!(!hasher.verify(&hash, "secret2").unwrap());
        assert!(!hasher.verify(&hash, "").unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash("same-password").unwrap();
        let second = hasher.hash("same-password").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify(&first, "same-password").unwrap());
        assert!(hasher.verify(&second, "same-password").unwrap());
    }

    #[test]
    fn test_password_too_long() {
        let hasher = hasher();
        let long = "a".repeat(MAX_PASSWORD_BYTES + 1);

        assert!(matches!(hasher.hash(&long), Err(HashingError::PasswordTooLong)));
        assert!(hasher.hash(&"a".repeat(MAX_PASSWORD_BYTES)).is_ok());
    }

    #[test]
    fn test_malformed_hash() {
        let result = hasher().verify("not-a-bcrypt-hash", "secret1");
        assert!(matches!(result, Err(HashingError::MalformedHash(_))));
    }
}
