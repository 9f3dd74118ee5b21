//! Authentication utilities.
//!
//! Password hashing (Argon2id) and signed identity tokens (HS256). Both
//! are leaf dependencies of the customer service; neither touches the
//! store.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quickbite_core::CustomerId;

/// Claims carried by an identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Customer id in hex form.
    pub sub: String,
    /// Random per-token id; two tokens for the same identity never compare
    /// equal even when issued within the same second.
    pub jti: Uuid,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiry (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// The customer identity the token was issued to.
    ///
    /// # Errors
    ///
    /// Returns an error if `sub` is not object-id hex.
    pub fn customer_id(&self) -> Result<CustomerId, quickbite_core::types::id::IdParseError> {
        CustomerId::parse(&self.sub)
    }
}

/// Issues and verifies identity tokens.
///
/// Verification here serves the token contract's tests and future
/// middleware; handlers in scope only issue.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer from the signing secret.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_hours: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Issue a token for a customer.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` if signing fails.
    pub fn issue(&self, customer_id: CustomerId) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: customer_id.to_string(),
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        Ok(jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &self.encoding,
        )?)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` if the signature is wrong or the token
    /// has expired.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// A bad hash and a bad password are indistinguishable to the caller.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_issuer() -> TokenIssuer {
        let secret = SecretString::from("kJ8#mN2$pQ5&rS7*tU9@vW1!xY3^zA6%");
        TokenIssuer::new(&secret, 24)
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("dosa-before-noon").unwrap();

        // PHC string, never the plaintext
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("dosa-before-noon"));

        assert!(verify_password("dosa-before-noon", &hash).is_ok());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(matches!(
            verify_password("wrong horse", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_token_roundtrip() {
        let issuer = test_issuer();
        let id = CustomerId::generate();

        let token = issuer.issue(id).unwrap();
        let claims = issuer.decode(&token).unwrap();

        assert_eq!(claims.customer_id().unwrap(), id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tokens_never_repeat() {
        let issuer = test_issuer();
        let id = CustomerId::generate();

        let first = issuer.issue(id).unwrap();
        let second = issuer.issue(id).unwrap();

        // Same identity, distinct tokens (fresh jti per issue)
        assert_ne!(first, second);
        assert_eq!(
            issuer.decode(&first).unwrap().sub,
            issuer.decode(&second).unwrap().sub
        );
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let issuer = test_issuer();
        let other = TokenIssuer::new(
            &SecretString::from("bV4@cX8#dZ2$eA6%fB0^gC3&hD7*iE1!"),
            24,
        );

        let token = issuer.issue(CustomerId::generate()).unwrap();
        assert!(matches!(other.decode(&token), Err(AuthError::Token(_))));
    }

    #[test]
    fn test_decode_rejects_expired() {
        // Negative TTL puts exp an hour in the past, beyond any leeway
        let secret = SecretString::from("kJ8#mN2$pQ5&rS7*tU9@vW1!xY3^zA6%");
        let issuer = TokenIssuer::new(&secret, -1);

        let token = issuer.issue(CustomerId::generate()).unwrap();
        assert!(matches!(issuer.decode(&token), Err(AuthError::Token(_))));
    }
}
