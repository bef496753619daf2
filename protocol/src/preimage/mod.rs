//! # Preimage Sources
//!
//! A receipt preimage is the secret byte string whose Keccak fingerprint
//! seeds the replay address. ADH never stores one: every resolution fetches
//! it fresh from a [`PreimageSource`].
//!
//! The production source is a static file host keyed by
//! `<address>_<chain code>.json` ([`HttpPreimageSource`]). The
//! [`StaticPreimageSource`] skips the network entirely, for when the operator
//! already has the preimage in hand.
//!
//! Preimage bytes are secret-ish. We log their length, never their content.

pub mod fixed;
pub mod http;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::identity::CanonicalAddress;

pub use fixed::StaticPreimageSource;
pub use http::{flat_file_url, HttpPreimageSource};

/// Errors from fetching or decoding a preimage.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The store answered with a non-success status.
    #[error("Fetching flatfile failed with status: {status}")]
    Status { status: u16, url: String },

    /// The request never got a response (DNS, TLS, timeout, ...).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The body is not JSON, or has no string `preimage` field.
    #[error("malformed flatfile from {url}: {reason}")]
    MalformedBody { url: String, reason: String },

    /// The `preimage` field is not valid hex.
    #[error("invalid preimage: {0}")]
    InvalidPreimage(String),
}

/// Raw preimage bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Preimage(Vec<u8>);

impl Preimage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decode a hex preimage. A leading `0x` marker is accepted and dropped.
    ///
    /// ```
    /// use adh_protocol::preimage::Preimage;
    ///
    /// let a = Preimage::from_hex("0xdeadbeef").unwrap();
    /// let b = Preimage::from_hex("DEADBEEF").unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
    /// ```
    pub fn from_hex(text: &str) -> Result<Self, FetchError> {
        let trimmed = text.trim();
        let body = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        hex::decode(body)
            .map(Self)
            .map_err(|e| FetchError::InvalidPreimage(e.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Keep preimages out of debug logs and panic messages.
impl fmt::Debug for Preimage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Preimage({} bytes)", self.0.len())
    }
}

/// Anything that can produce the preimage for a classified identity.
///
/// Implementations do exactly one lookup per call. No retries, no caching:
/// a failure ends the resolution.
#[async_trait]
pub trait PreimageSource: Send + Sync {
    async fn fetch(
        &self,
        address: &CanonicalAddress,
        chain_code: u16,
    ) -> Result<Preimage, FetchError>;
}
