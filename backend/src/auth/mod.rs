//! Authentication building blocks
//!
//! - bcrypt password hashing and verification
//! - JWT access token issuance and validation

mod jwt;
mod password;

pub use jwt::{Claims, IssuedToken, TokenError, TokenIssuer};
pub use password::{HashingError, PasswordHasher, MAX_PASSWORD_BYTES};
