//! # Hashing Utilities
//!
//! ADH needs exactly two hash functions, and it needs them to be
//! byte-for-byte compatible with chains we don't control:
//!
//! - **SHA-256** — what the program-address derivation hashes with. The
//!   on-chain runtime decides this, not us.
//!
//! - **Keccak-256** — the *legacy* Keccak, as used by Ethereum and by the
//!   receipt Merkle tree. Not NIST SHA3-256. The two differ only in padding,
//!   which is exactly the kind of difference that produces a perfectly valid,
//!   perfectly wrong address.
//!
//! ## Receipt leaves
//!
//! A receipt leaf is `0x00 ‖ preimage`. The leading zero byte is the leaf
//! type tag of the Merkle tree the receipts were committed to (interior nodes
//! use a different tag), and the leaf hash is the Keccak-256 digest truncated
//! to its first 20 bytes.

use sha2::Sha256;
use sha3::{Digest, Keccak256};

/// Length of a truncated receipt leaf hash.
pub const LEAF_HASH_LENGTH: usize = 20;

/// Type tag prepended to a preimage before it is hashed into a leaf.
pub const LEAF_TYPE_TAG: u8 = 0x00;

/// Hash multiple byte slices together with SHA-256, in order.
///
/// Feeds each part into the hasher instead of concatenating them first.
/// Same digest as hashing the concatenation, minus the temporary buffer.
///
/// # Example
///
/// ```
/// use adh_protocol::crypto::hash::sha256_multi;
///
/// let split = sha256_multi(&[b"hello", b" world"]);
/// let joined = sha256_multi(&[b"hello world"]);
/// assert_eq!(split, joined);
/// ```
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute the legacy Keccak-256 digest of the input data.
///
/// # Example
///
/// ```
/// use adh_protocol::crypto::hash::keccak256;
///
/// let digest = keccak256(b"");
/// assert_eq!(
///     hex::encode(digest),
///     "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
/// );
/// ```
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let result = Keccak256::digest(data);
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash a receipt preimage into its 20-byte leaf fingerprint.
///
/// Computes `keccak256(0x00 ‖ preimage)[..20]`. This is the value that seeds
/// the replay-address derivation, so every byte here matters.
pub fn receipt_leaf_hash(preimage: &[u8]) -> [u8; LEAF_HASH_LENGTH] {
    let mut hasher = Keccak256::new();
    hasher.update([LEAF_TYPE_TAG]);
    hasher.update(preimage);
    let digest = hasher.finalize();

    let mut leaf = [0u8; LEAF_HASH_LENGTH];
    leaf.copy_from_slice(&digest[..LEAF_HASH_LENGTH]);
    leaf
}
