//! Session token issuance and verification
//!
//! Tokens are HS256 JWTs signed with a process-wide secret. They embed the
//! user ID and a fixed expiration and are not stored server-side: validity
//! is decided by signature and expiry alone, so there is no way to revoke a
//! token before it expires.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Session token lifetime: 15 days
pub const SESSION_TOKEN_LIFETIME_SECS: u64 = 15 * 24 * 60 * 60;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared secret used to sign and verify tokens
    pub secret: String,
    /// Token lifetime in seconds
    pub token_lifetime: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Signing secret (required)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        Ok(Self::new(secret))
    }

    pub fn new(secret: impl Into<String>) -> Self {
        JwtConfig {
            secret: secret.into(),
            token_lifetime: SESSION_TOKEN_LIFETIME_SECS,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_lifetime", &self.token_lifetime)
            .finish()
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Errors produced while issuing or verifying session tokens
#[derive(Error, Debug)]
pub enum TokenError {
    /// Bad signature, malformed token or expired token
    #[error("Invalid session token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("Failed to sign session token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Failed to get current time: {0}")]
    Clock(#[from] SystemTimeError),
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Result<Self> {
        if config.secret.trim().is_empty() {
            anyhow::bail!("JWT secret must not be empty");
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        })
    }

    /// Issue a session token for a user, valid from now
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        self.issue_at(user_id, now)
    }

    /// Issue a session token as if it had been issued at `issued_at`
    /// (seconds since the Unix epoch)
    pub fn issue_at(&self, user_id: Uuid, issued_at: u64) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id,
            iat: issued_at,
            exp: issued_at + self.config.token_lifetime,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)?;

        info!("Generated session token for user ID: {}", user_id);
        Ok(token)
    }

    /// Verify a token and return the user ID it was issued for
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::Invalid)?;
        Ok(token_data.claims.sub)
    }

    /// Get the token lifetime in seconds
    pub fn token_lifetime(&self) -> u64 {
        self.config.token_lifetime
    }
}
