//! # Account Addresses
//!
//! A [`Pubkey`] is a 32-byte account address in the ed25519 key space,
//! rendered as base-58 the way every Solana tool renders it.
//!
//! Not every 32-byte value is a public key. Some decompress to a point on
//! the Edwards curve (and therefore *could* have a private key somewhere),
//! some don't. Program-derived addresses deliberately live in the second
//! group, and [`Pubkey::is_on_curve`] is how we tell the two apart.

use curve25519_dalek::edwards::CompressedEdwardsY;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of an address in bytes.
pub const PUBKEY_BYTES: usize = 32;

/// Longest base-58 string that can encode 32 bytes. Anything longer is
/// rejected before we bother decoding it.
pub const MAX_BASE58_LEN: usize = 44;

/// Errors from parsing a base-58 address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PubkeyError {
    #[error("address string is too long: {0} characters (max 44)")]
    TooLong(usize),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid address length: expected 32 bytes, got {0}")]
    WrongLength(usize),
}

/// A 32-byte account address.
///
/// Serializes as its base-58 string so that addresses stay readable in
/// configuration files and JSON output.
///
/// # Examples
///
/// ```
/// use adh_protocol::crypto::Pubkey;
///
/// let system: Pubkey = "11111111111111111111111111111111".parse().unwrap();
/// assert_eq!(system.to_bytes(), [0u8; 32]);
/// assert_eq!(system.to_string(), "11111111111111111111111111111111");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pubkey([u8; PUBKEY_BYTES]);

impl Pubkey {
    /// Wrap raw bytes. No validation: every 32-byte value is an address.
    pub const fn new_from_array(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Build an address from a slice, which must be exactly 32 bytes.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, PubkeyError> {
        let array: [u8; PUBKEY_BYTES] = bytes
            .try_into()
            .map_err(|_| PubkeyError::WrongLength(bytes.len()))?;
        Ok(Self(array))
    }

    /// The raw 32 bytes.
    pub fn to_bytes(&self) -> [u8; PUBKEY_BYTES] {
        self.0
    }

    /// Whether these bytes decompress to a valid Edwards25519 point.
    ///
    /// On-curve addresses may have a private key. Off-curve addresses cannot,
    /// which is the whole point of a program-derived address.
    pub fn is_on_curve(&self) -> bool {
        bytes_are_curve_point(&self.0)
    }
}

/// Whether `bytes` is the compressed encoding of an Edwards25519 point.
pub fn bytes_are_curve_point(bytes: &[u8; PUBKEY_BYTES]) -> bool {
    CompressedEdwardsY(*bytes).decompress().is_some()
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBKEY_BYTES]> for Pubkey {
    fn from(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Pubkey {
    type Err = PubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_BASE58_LEN {
            return Err(PubkeyError::TooLong(s.len()));
        }
        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|e| PubkeyError::InvalidBase58(e.to_string()))?;
        Self::try_from_slice(&decoded)
    }
}

impl TryFrom<String> for Pubkey {
    type Error = PubkeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pubkey> for String {
    fn from(key: Pubkey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self)
    }
}
