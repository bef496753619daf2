//! Top-level error type.
//!
//! Each module owns its own error enum. [`AdhError`] just gives callers one
//! type to match on when they drive a whole pipeline.

use thiserror::Error;

use crate::config::ConfigError;
use crate::crypto::{DeriveError, PubkeyError};
use crate::identity::ClassifyError;
use crate::preimage::FetchError;

#[derive(Debug, Error)]
pub enum AdhError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Derive(#[from] DeriveError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid owner address: {0}")]
    InvalidOwner(#[from] PubkeyError),
}
