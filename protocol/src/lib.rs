// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # ADH — Address Derivation Helper
//!
//! Answers one question people keep asking: *"where did my tokens go?"*
//!
//! Given a chat handle, a chain address or a wallet key, ADH works out which
//! ecosystem it belongs to, fetches the receipt preimage recorded for it,
//! and derives the on-chain receipt account from that preimage. It can also
//! derive the associated token account holding the configured mint for any
//! owner.
//!
//! ## Architecture
//!
//! - **identity** — Ecosystem tags and the classifier. Pure, ordered rules.
//! - **crypto** — SHA-256, Keccak-256, base58 addresses, and the
//!   program-derived address search. Byte-exact or bust.
//! - **preimage** — The [`PreimageSource`](preimage::PreimageSource) seam,
//!   with an HTTP flat-file implementation and an offline one.
//! - **pipeline** — Replay-address and token-account flows built from the
//!   pieces above.
//! - **config** — Program IDs, mint, endpoints and chain codes for one
//!   deployment. Defaults point at production.
//! - **error** — One umbrella error over the per-module ones.
//!
//! ## Ground rules
//!
//! 1. Derivation is deterministic. Same inputs, same address, every time.
//! 2. Nothing is cached or persisted. Every resolution fetches fresh.
//! 3. Every failure is terminal and surfaced verbatim. No retries.

pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod pipeline;
pub mod preimage;

pub use config::DeploymentConfig;
pub use error::AdhError;
