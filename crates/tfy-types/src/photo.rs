use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::ids::UserId;

/// Content-addressed reference to a stored profile photo.
///
/// A `PhotoRef` is the domain-separated BLAKE3 hash of the photo bytes and
/// the owning user, so two users uploading the same image still get
/// distinct references. Serialized as a 64-character hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhotoRef([u8; 32]);

impl PhotoRef {
    /// Derive the reference for `data` uploaded by `owner`.
    pub fn derive(owner: &UserId, data: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"tfy-photo-v1:");
        hasher.update(owner.as_uuid().as_bytes());
        hasher.update(b":");
        hasher.update(data);
        Self(*hasher.finalize().as_bytes())
    }

    /// Create a reference from a pre-computed hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhotoRef({})", self.short_hex())
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for PhotoRef {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<PhotoRef> for String {
    fn from(photo: PhotoRef) -> Self {
        photo.to_hex()
    }
}

/// Metadata recorded alongside an uploaded photo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoMeta {
    #[serde(rename = "ref")]
    pub reference: PhotoRef,
    pub owner: UserId,
    pub filename: Option<String>,
    pub content_type: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// A stored photo: metadata plus the raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Photo {
    pub meta: PhotoMeta,
    pub data: Vec<u8>,
}

impl Photo {
    /// Build a photo record for `data`, computing its reference and size.
    pub fn new(
        owner: UserId,
        filename: Option<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        let meta = PhotoMeta {
            reference: PhotoRef::derive(&owner, &data),
            owner,
            filename,
            content_type: content_type.into(),
            size: data.len() as u64,
            uploaded_at: Utc::now(),
        };
        Self { meta, data }
    }
}
