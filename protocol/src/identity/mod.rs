//! # Identity Module
//!
//! Works out *whose* receipt we are looking for. A user hands us a chat
//! handle, an EVM address, a Move address, a bech32 Cosmos address, an
//! Algorand address or a Solana key, usually without saying which. This
//! module:
//!
//! 1. **Ecosystem** — names the supported namespaces and maps each one to
//!    the numeric chain code the receipt store is keyed by.
//! 2. **Classifier** — decides which namespace a raw string belongs to and
//!    normalizes it (EVM addresses are lower-cased, nothing else is touched).
//!
//! Classification is pure. No I/O, no caching, same input, same answer.

pub mod classifier;
pub mod ecosystem;

pub use classifier::{classify, CanonicalAddress, ClassifyError, Identity};
pub use ecosystem::{Ecosystem, UnknownEcosystem};
