//! User identity claims.
//!
//! User records, credentials and token issuance live in the external
//! user-management service; this server only verifies the bearer token it
//! issues and reads the role flag for authorization checks.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Claims carried by a verified bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Subject (user id)
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub is_superuser: bool,
    /// Expiration timestamp
    pub exp: usize,
}

impl UserClaims {
    /// Decode and validate a JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<UserClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }

    /// All mutating endpoints except application submission are
    /// superuser-only.
    pub fn require_superuser(&self) -> AppResult<()> {
        if self.is_superuser {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Superuser privileges required".to_string(),
            ))
        }
    }
}
