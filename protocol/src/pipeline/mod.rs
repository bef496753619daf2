//! # Pipelines
//!
//! The two things ADH actually does, each composed from the pieces in
//! [`identity`](crate::identity), [`preimage`](crate::preimage) and
//! [`crypto`](crate::crypto):
//!
//! - **Replay address** — classify → fetch preimage → hash → derive under
//!   the receipt program.
//! - **Token account** — owner + token program + mint → derive under the
//!   associated-token program. No classification, no network.

pub mod replay;
pub mod token_account;

pub use replay::{replay_address, replay_seeds, ReplayAddressPipeline, ReplayResolution};
pub use token_account::TokenAccountPipeline;
