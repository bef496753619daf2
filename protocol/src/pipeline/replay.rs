//! Replay-address resolution: identity → preimage → receipt account.

use serde::Serialize;

use crate::config::{DeploymentConfig, RECEIPT_SEED};
use crate::crypto::hash::{receipt_leaf_hash, LEAF_HASH_LENGTH};
use crate::crypto::{find_program_address, DeriveError, DerivedAddress, Pubkey};
use crate::error::AdhError;
use crate::identity::{CanonicalAddress, Ecosystem, Identity};
use crate::preimage::{Preimage, PreimageSource};

/// The ordered seeds for a receipt account: `["receipt", leaf_hash]`.
pub fn replay_seeds(preimage: &Preimage) -> (&'static [u8], [u8; LEAF_HASH_LENGTH]) {
    (RECEIPT_SEED, receipt_leaf_hash(preimage.as_bytes()))
}

/// Derive the receipt account for a preimage under `receipt_program`.
///
/// Pure and deterministic: the same preimage always maps to the same
/// address and bump.
pub fn replay_address(
    preimage: &Preimage,
    receipt_program: &Pubkey,
) -> Result<DerivedAddress, DeriveError> {
    let (prefix, leaf) = replay_seeds(preimage);
    tracing::debug!(leaf = %hex::encode(leaf), "receipt leaf hash");
    find_program_address(&[prefix, &leaf], receipt_program)
}

/// Everything learned while resolving one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayResolution {
    pub identity: String,
    pub ecosystem: Ecosystem,
    pub chain_code: u16,
    pub replay_address: Pubkey,
    pub bump: u8,
}

impl ReplayResolution {
    fn new(canonical: CanonicalAddress, chain_code: u16, derived: DerivedAddress) -> Self {
        Self {
            identity: canonical.address,
            ecosystem: canonical.ecosystem,
            chain_code,
            replay_address: derived.address,
            bump: derived.bump,
        }
    }
}

/// Classifies an identity, fetches its preimage, and derives the replay
/// address. One identity, one fetch, no shared state between calls.
pub struct ReplayAddressPipeline<S> {
    config: DeploymentConfig,
    source: S,
}

impl<S: PreimageSource> ReplayAddressPipeline<S> {
    pub fn new(config: DeploymentConfig, source: S) -> Self {
        Self { config, source }
    }

    /// Run the whole pipeline for one identity.
    ///
    /// Fails with the first error encountered: classification, missing chain
    /// code, fetch, or derivation. Nothing is written anywhere, so there is
    /// nothing to roll back.
    pub async fn resolve(&self, identity: &Identity) -> Result<ReplayResolution, AdhError> {
        let canonical = identity.classify()?;
        let chain_code = self.config.chain_code(canonical.ecosystem)?;
        tracing::debug!(
            address = %canonical.address,
            ecosystem = %canonical.ecosystem,
            chain_code,
            "identity classified"
        );

        let preimage = self.source.fetch(&canonical, chain_code).await?;
        let derived = replay_address(&preimage, &self.config.receipt_program)?;
        tracing::debug!(address = %derived.address, bump = derived.bump, "replay address derived");

        Ok(ReplayResolution::new(canonical, chain_code, derived))
    }
}
