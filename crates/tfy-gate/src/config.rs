use serde::{Deserialize, Serialize};
use tfy_crypto::password::{DEFAULT_COST, MAX_COST, MIN_COST};
use tfy_crypto::token::MIN_TOKEN_BYTES;
use tfy_crypto::{PasswordHasher, TokenGenerator};

use crate::error::AuthError;

/// Credential and session settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: u32,
    /// Bytes of OS randomness per session token (hex doubles the length).
    pub token_bytes: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_COST,
            token_bytes: MIN_TOKEN_BYTES,
        }
    }
}

impl AuthConfig {
    /// Check the values against what the primitives accept.
    pub fn validate(&self) -> Result<(), AuthError> {
        if !(MIN_COST..=MAX_COST).contains(&self.bcrypt_cost) {
            return Err(AuthError::Config(format!(
                "bcrypt_cost must be within {MIN_COST}..={MAX_COST}, got {}",
                self.bcrypt_cost
            )));
        }
        if self.token_bytes < MIN_TOKEN_BYTES {
            return Err(AuthError::Config(format!(
                "token_bytes must be at least {MIN_TOKEN_BYTES}, got {}",
                self.token_bytes
            )));
        }
        Ok(())
    }

    pub fn hasher(&self) -> Result<PasswordHasher, AuthError> {
        Ok(PasswordHasher::new(self.bcrypt_cost)?)
    }

    pub fn token_generator(&self) -> Result<TokenGenerator, AuthError> {
        Ok(TokenGenerator::new(self.token_bytes)?)
    }
}
