//! Authentication error types.

use thiserror::Error;

/// Errors that can occur in the auth utilities.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password, or a stored hash that does not parse.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("password hashing error")]
    PasswordHash,

    /// Token signing or verification failed.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}
