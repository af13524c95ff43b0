//! Core JWT handler implementation

use super::types::{Claims, JwtHandler};
use crate::config::AuthConfig;
use crate::utils::error::{ForumError, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

impl JwtHandler {
    /// Create a new JWT handler from the auth configuration
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
            issuer: config.issuer.clone(),
        }
    }

    /// Issue a signed session token bound to a user id
    pub fn issue_token(&self, user_id: Uuid) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ForumError::internal(format!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.expiration,
            iss: self.issuer.clone(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| ForumError::internal(format!("Token signing failed: {}", e)))?;

        debug!("Issued session token for user: {}", user_id);
        Ok(token)
    }

    /// Verify a session token and return its claims
    ///
    /// Fails on bad signature, malformed input, wrong issuer, or expiry.
    /// Zero leeway: an expiry timestamp at or before now is rejected.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("Session token verification failed: {}", e);
            ForumError::unauthenticated("Invalid or expired login")
        })?;

        debug!("Session token verified for user: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }

    /// Session token lifetime in seconds
    pub fn expiration(&self) -> u64 {
        self.expiration
    }
}
