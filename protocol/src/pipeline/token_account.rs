//! Associated token account derivation for the configured mint.

use crate::config::DeploymentConfig;
use crate::crypto::{find_program_address, DeriveError, DerivedAddress, Pubkey};

/// Derives the associated token account that holds the configured mint for
/// a given owner. No classification and no network: owner in, address out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccountPipeline {
    associated_token_program: Pubkey,
    token_program: Pubkey,
    mint: Pubkey,
}

impl TokenAccountPipeline {
    pub fn new(associated_token_program: Pubkey, token_program: Pubkey, mint: Pubkey) -> Self {
        Self {
            associated_token_program,
            token_program,
            mint,
        }
    }

    pub fn from_config(config: &DeploymentConfig) -> Self {
        Self::new(
            config.associated_token_program,
            config.token_program,
            config.mint,
        )
    }

    pub fn mint(&self) -> &Pubkey {
        &self.mint
    }

    /// Seeds are `[owner, token_program, mint]`, in that order.
    pub fn derive(&self, owner: &Pubkey) -> Result<DerivedAddress, DeriveError> {
        let derived = find_program_address(
            &[owner.as_ref(), self.token_program.as_ref(), self.mint.as_ref()],
            &self.associated_token_program,
        )?;
        tracing::debug!(
            owner = %owner,
            mint = %self.mint,
            address = %derived.address,
            bump = derived.bump,
            "associated token account derived"
        );
        Ok(derived)
    }
}
