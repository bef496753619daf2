//! # Cryptographic Primitives for ADH
//!
//! Everything ADH computes ends up as an address that some other system has
//! to agree with, byte for byte. So this module does not invent anything:
//!
//! - **SHA-256** for program-address derivation, because the runtime says so.
//! - **Keccak-256** for receipt leaves, because the receipt tree says so.
//! - **Edwards25519 point decompression** for the off-curve check, because
//!   that is what makes a derived address unsignable.
//!
//! All of it is a thin, typed wrapper around audited crates (`sha2`, `sha3`,
//! `curve25519-dalek`).

pub mod hash;
pub mod pda;
pub mod pubkey;

pub use hash::{keccak256, receipt_leaf_hash, sha256_multi};
pub use pda::{create_program_address, find_program_address, DeriveError, DerivedAddress};
pub use pubkey::{Pubkey, PubkeyError};
