use rand::rngs::OsRng;
use rand::RngCore;
use tfy_types::SessionToken;

use crate::error::{CryptoError, CryptoResult};

/// Smallest token size accepted, in bytes of entropy.
pub const MIN_TOKEN_BYTES: usize = 16;

/// Generates session tokens from the operating system CSPRNG.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenGenerator {
    bytes: usize,
}

impl TokenGenerator {
    /// A generator producing tokens with `bytes` bytes of entropy.
    pub fn new(bytes: usize) -> CryptoResult<Self> {
        if bytes < MIN_TOKEN_BYTES {
            return Err(CryptoError::TokenTooShort {
                min: MIN_TOKEN_BYTES,
                actual: bytes,
            });
        }
        Ok(Self { bytes })
    }

    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// A fresh hex-encoded token.
    pub fn generate(&self) -> SessionToken {
        let mut buf = vec![0u8; self.bytes];
        OsRng.fill_bytes(&mut buf);
        SessionToken::from_bytes(&buf)
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self {
            bytes: MIN_TOKEN_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn token_is_hex_of_requested_length() {
        let token = TokenGenerator::new(24).unwrap().generate();
        assert_eq!(token.as_str().len(), 48);
        assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_do_not_repeat() {
        let generator = TokenGenerator::default();
        let tokens: HashSet<_> = (0..1000).map(|_| generator.generate()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn rejects_short_tokens() {
        let err = TokenGenerator::new(8).unwrap_err();
        assert_eq!(err, CryptoError::TokenTooShort { min: 16, actual: 8 });
    }
}
