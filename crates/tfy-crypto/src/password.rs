use crate::error::{CryptoError, CryptoResult};

/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;
/// Default work factor: 2^10 rounds.
pub const DEFAULT_COST: u32 = 10;

/// Salted, adaptive-cost password hashing backed by bcrypt.
///
/// Hashing is deliberately slow. Async callers should run it on a blocking
/// thread rather than on a runtime worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// A hasher with the given bcrypt cost.
    pub fn new(cost: u32) -> CryptoResult<Self> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(CryptoError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash `plaintext` with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> CryptoResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| CryptoError::Hash(e.to_string()))
    }

    /// Check `plaintext` against a stored digest.
    ///
    /// Returns `Ok(false)` on mismatch and `Err` only if the digest itself is
    /// malformed.
    pub fn verify(&self, plaintext: &str, digest: &str) -> CryptoResult<bool> {
        bcrypt::verify(plaintext, digest).map_err(|e| CryptoError::Hash(e.to_string()))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}
