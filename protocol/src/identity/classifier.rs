//! # Identity Classification
//!
//! Turns whatever the user pasted into a canonical `(address, ecosystem)`
//! pair. Address formats overlap in shape, so the rules run in a fixed order
//! and the first match wins:
//!
//! | # | Shape                                   | Ecosystem          |
//! |---|-----------------------------------------|--------------------|
//! | 1 | `osmo1…`                                | Osmosis            |
//! | 2 | `terra1…`                               | Terra              |
//! | 3 | `inj1…`                                 | Injective          |
//! | 4 | `0x` + 40 hex                           | Ethereum (lowered) |
//! | 5 | `0x` + 64 hex                           | Sui or Aptos (hint)|
//! | 6 | any other `0x…`                         | error              |
//! | 7 | 5–20 decimal digits                     | Discord            |
//! | 8 | 58 chars of `[A-Z2-7]`                  | Algorand           |
//! | 9 | base58 of exactly 32 bytes              | Solana             |
//!
//! Sui and Aptos addresses are indistinguishable by shape (both are 32-byte
//! hex), so rule 5 needs a hint from the caller. Anything that is a prefix of
//! `sui` or `aptos` (case-insensitive) will do, which is why `s` and `a` work.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::ecosystem::Ecosystem;
use crate::crypto::Pubkey;

const HEX_PREFIX: &str = "0x";
const EVM_HEX_LEN: usize = 40;
const MOVE_HEX_LEN: usize = 64;
const DISCORD_MIN_DIGITS: usize = 5;
const DISCORD_MAX_DIGITS: usize = 20;
const ALGORAND_ADDRESS_LEN: usize = 58;

/// Errors from classifying a raw identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// Matches no supported address shape, or fails base58 validation.
    #[error("Invalid address: '{0}'")]
    InvalidAddress(String),

    /// Starts with `0x` but has the wrong length or non-hex content.
    #[error("Invalid hex address: {0}")]
    InvalidHexAddress(String),

    /// Valid for more than one ecosystem and the hint did not settle it.
    #[error(
        "Can't automatically distinguish {} addresses for {address}.\n\
         specify via '<addr> s' or '<addr> a' argument",
        candidates_label(.candidates)
    )]
    AmbiguousAddress {
        address: String,
        candidates: Vec<Ecosystem>,
    },
}

fn candidates_label(candidates: &[Ecosystem]) -> String {
    let labels: Vec<&str> = candidates.iter().map(Ecosystem::label).collect();
    labels.join(" and ")
}

/// A normalized address tagged with its ecosystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalAddress {
    pub address: String,
    pub ecosystem: Ecosystem,
}

impl CanonicalAddress {
    fn new(address: impl Into<String>, ecosystem: Ecosystem) -> Self {
        Self {
            address: address.into(),
            ecosystem,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address, self.ecosystem)
    }
}

/// A raw identity as the user supplied it, plus an optional ecosystem hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    raw: String,
    hint: Option<String>,
}

impl Identity {
    pub fn new(raw: impl Into<String>, hint: Option<&str>) -> Self {
        Self {
            raw: raw.into(),
            hint: hint.map(str::to_string),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Classify this identity. See [`classify`].
    pub fn classify(&self) -> Result<CanonicalAddress, ClassifyError> {
        classify(&self.raw, self.hint())
    }
}

/// Classify a raw identity string into a canonical address.
///
/// The hint only matters for 32-byte hex addresses; it is ignored otherwise.
/// An empty hint counts as no hint.
///
/// # Examples
///
/// ```
/// use adh_protocol::identity::{classify, Ecosystem};
///
/// let eth = classify("0x000000000000A25D11D75BDD1EBF1397DB20BBC1", None).unwrap();
/// assert_eq!(eth.address, "0x000000000000a25d11d75bdd1ebf1397db20bbc1");
/// assert_eq!(eth.ecosystem, Ecosystem::Ethereum);
///
/// let discord = classify("468526016151814164", None).unwrap();
/// assert_eq!(discord.ecosystem, Ecosystem::Discord);
/// ```
pub fn classify(raw: &str, hint: Option<&str>) -> Result<CanonicalAddress, ClassifyError> {
    if raw.starts_with("osmo1") {
        return Ok(CanonicalAddress::new(raw, Ecosystem::Osmosis));
    }
    if raw.starts_with("terra1") {
        return Ok(CanonicalAddress::new(raw, Ecosystem::Terra));
    }
    if raw.starts_with("inj1") {
        return Ok(CanonicalAddress::new(raw, Ecosystem::Injective));
    }
    if let Some(hex_body) = raw.strip_prefix(HEX_PREFIX) {
        return classify_hex(raw, hex_body, hint);
    }
    if is_discord_id(raw) {
        return Ok(CanonicalAddress::new(raw, Ecosystem::Discord));
    }
    if is_algorand_address(raw) {
        return Ok(CanonicalAddress::new(raw, Ecosystem::Algorand));
    }
    match raw.parse::<Pubkey>() {
        Ok(_) => Ok(CanonicalAddress::new(raw, Ecosystem::Solana)),
        Err(_) => Err(ClassifyError::InvalidAddress(raw.to_string())),
    }
}

fn classify_hex(
    raw: &str,
    hex_body: &str,
    hint: Option<&str>,
) -> Result<CanonicalAddress, ClassifyError> {
    if !hex_body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ClassifyError::InvalidHexAddress(raw.to_string()));
    }

    match hex_body.len() {
        EVM_HEX_LEN => Ok(CanonicalAddress::new(
            raw.to_ascii_lowercase(),
            Ecosystem::Ethereum,
        )),
        MOVE_HEX_LEN => match resolve_move_hint(hint) {
            Some(eco) => Ok(CanonicalAddress::new(raw, eco)),
            None => Err(ClassifyError::AmbiguousAddress {
                address: raw.to_string(),
                candidates: vec![Ecosystem::Sui, Ecosystem::Aptos],
            }),
        },
        _ => Err(ClassifyError::InvalidHexAddress(raw.to_string())),
    }
}

/// Sui is checked before Aptos.
fn resolve_move_hint(hint: Option<&str>) -> Option<Ecosystem> {
    let hint = hint.filter(|h| !h.is_empty())?.to_lowercase();
    [Ecosystem::Sui, Ecosystem::Aptos]
        .into_iter()
        .find(|eco| eco.name().starts_with(hint.as_str()))
}

fn is_discord_id(raw: &str) -> bool {
    (DISCORD_MIN_DIGITS..=DISCORD_MAX_DIGITS).contains(&raw.len())
        && raw.bytes().all(|b| b.is_ascii_digit())
}

fn is_algorand_address(raw: &str) -> bool {
    raw.len() == ALGORAND_ADDRESS_LEN
        && raw
            .bytes()
            .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b))
}
