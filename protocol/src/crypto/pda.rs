//! # Program-Derived Addresses
//!
//! A program-derived address (PDA) is an account address that a program can
//! sign for without anyone holding a private key. It is computed as:
//!
//! ```text
//! SHA-256( seed_0 ‖ seed_1 ‖ … ‖ bump ‖ program_id ‖ "ProgramDerivedAddress" )
//! ```
//!
//! and is only accepted if the digest is *not* a valid Edwards25519 point.
//! The trailing marker keeps these hashes from ever colliding with ordinary
//! key-derived addresses.
//!
//! The bump is a single byte searched from 255 downwards. Roughly half of all
//! digests land on the curve, so the first candidate usually works and the
//! second almost always does. Seed order is part of the hash input: swapping
//! two seeds gives a different address.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hash::sha256_multi;
use super::pubkey::{bytes_are_curve_point, Pubkey};

/// Domain marker appended to every derivation hash.
pub const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Maximum length of a single seed in bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of seeds, *including* the bump seed.
pub const MAX_SEEDS: usize = 16;

/// Errors from program-address derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    /// More seeds than the runtime accepts.
    #[error("too many seeds: {got} (max {max})")]
    MaxSeedsExceeded { got: usize, max: usize },

    /// A seed longer than [`MAX_SEED_LEN`].
    #[error("seed {index} is {len} bytes long (max 32)")]
    MaxSeedLengthExceeded { index: usize, len: usize },

    /// The candidate digest is a valid curve point and cannot be a PDA.
    #[error("derived address lies on the ed25519 curve")]
    OnCurve,

    /// Every bump from 255 to 0 landed on the curve.
    #[error("no valid bump: all 256 candidates lie on the ed25519 curve")]
    NoValidBump,
}

/// A program-derived address together with the bump that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub bump: u8,
}

fn check_seeds(seeds: &[&[u8]], max: usize) -> Result<(), DeriveError> {
    if seeds.len() > max {
        return Err(DeriveError::MaxSeedsExceeded {
            got: seeds.len(),
            max,
        });
    }
    if let Some((index, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(DeriveError::MaxSeedLengthExceeded {
            index,
            len: seed.len(),
        });
    }
    Ok(())
}

/// Hash one candidate. `bump` is `None` when the caller already included
/// it in `seeds`.
fn candidate(seeds: &[&[u8]], bump: Option<u8>, program: &Pubkey) -> [u8; 32] {
    let bump_seed = bump.map(|b| [b]);
    let mut parts: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 3);
    parts.extend_from_slice(seeds);
    if let Some(bump_seed) = bump_seed.as_ref() {
        parts.push(bump_seed);
    }
    parts.push(program.as_ref());
    parts.push(PDA_MARKER);
    sha256_multi(&parts)
}

/// Derive a single program address from the exact seeds given.
///
/// No bump search happens here. If the caller wants a bump, it has to be one
/// of the seeds. Fails with [`DeriveError::OnCurve`] when the digest happens
/// to be a valid public key.
///
/// # Example
///
/// ```
/// use adh_protocol::crypto::pda::create_program_address;
/// use adh_protocol::crypto::Pubkey;
///
/// let program: Pubkey = "BPFLoaderUpgradeab1e11111111111111111111111".parse().unwrap();
/// let address = create_program_address(&[b"Talking", b"Squirrels"], &program).unwrap();
/// assert_eq!(address.to_string(), "2fnQrngrQT4SeLcdToJAD96phoEjNL2man2kfRLCASVk");
/// ```
pub fn create_program_address(seeds: &[&[u8]], program: &Pubkey) -> Result<Pubkey, DeriveError> {
    check_seeds(seeds, MAX_SEEDS)?;
    let digest = candidate(seeds, None, program);
    if bytes_are_curve_point(&digest) {
        return Err(DeriveError::OnCurve);
    }
    Ok(Pubkey::new_from_array(digest))
}

/// Find the canonical program address for `seeds`: the one with the highest
/// bump whose digest is off the curve.
///
/// `seeds` must leave room for the bump, so at most `MAX_SEEDS - 1` of them,
/// each at most [`MAX_SEED_LEN`] bytes. Breaking that is a configuration
/// error and fails before any hashing.
pub fn find_program_address(
    seeds: &[&[u8]],
    program: &Pubkey,
) -> Result<DerivedAddress, DeriveError> {
    check_seeds(seeds, MAX_SEEDS - 1)?;

    for bump in (0..=u8::MAX).rev() {
        let digest = candidate(seeds, Some(bump), program);
        if !bytes_are_curve_point(&digest) {
            tracing::trace!(bump, "accepted off-curve candidate");
            return Ok(DerivedAddress {
                address: Pubkey::new_from_array(digest),
                bump,
            });
        }
    }

    Err(DeriveError::NoValidBump)
}
