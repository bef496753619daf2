//! Supported ecosystems and their numeric codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the address namespaces an identity can belong to.
///
/// Discord is not a chain, but its numeric user IDs are first-class
/// identities as far as receipts are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Discord,
    Solana,
    Ethereum,
    Sui,
    Aptos,
    Osmosis,
    Terra,
    Injective,
    Algorand,
}

/// Returned when parsing an unknown ecosystem name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ecosystem: '{0}'")]
pub struct UnknownEcosystem(pub String);

impl Ecosystem {
    /// Every ecosystem, in declaration order.
    pub const ALL: [Ecosystem; 9] = [
        Ecosystem::Discord,
        Ecosystem::Solana,
        Ecosystem::Ethereum,
        Ecosystem::Sui,
        Ecosystem::Aptos,
        Ecosystem::Osmosis,
        Ecosystem::Terra,
        Ecosystem::Injective,
        Ecosystem::Algorand,
    ];

    /// Lower-case name, as used in config files and JSON.
    pub fn name(&self) -> &'static str {
        match self {
            Ecosystem::Discord => "discord",
            Ecosystem::Solana => "solana",
            Ecosystem::Ethereum => "ethereum",
            Ecosystem::Sui => "sui",
            Ecosystem::Aptos => "aptos",
            Ecosystem::Osmosis => "osmosis",
            Ecosystem::Terra => "terra",
            Ecosystem::Injective => "injective",
            Ecosystem::Algorand => "algorand",
        }
    }

    /// Capitalized name for human-facing output.
    pub fn label(&self) -> &'static str {
        match self {
            Ecosystem::Discord => "Discord",
            Ecosystem::Solana => "Solana",
            Ecosystem::Ethereum => "Ethereum",
            Ecosystem::Sui => "Sui",
            Ecosystem::Aptos => "Aptos",
            Ecosystem::Osmosis => "Osmosis",
            Ecosystem::Terra => "Terra",
            Ecosystem::Injective => "Injective",
            Ecosystem::Algorand => "Algorand",
        }
    }

    /// The chain code used to key flat files for this ecosystem.
    ///
    /// These are Wormhole chain IDs, except Discord which gets a private
    /// value well outside the chain ID range.
    pub fn default_chain_code(&self) -> u16 {
        match self {
            Ecosystem::Discord => 14443,
            Ecosystem::Solana => 1,
            Ecosystem::Ethereum => 2,
            Ecosystem::Sui => 21,
            Ecosystem::Aptos => 22,
            Ecosystem::Osmosis => 20,
            Ecosystem::Terra => 3,
            Ecosystem::Injective => 19,
            Ecosystem::Algorand => 8,
        }
    }

    /// Index used by the on-chain claim program to tag ecosystems.
    ///
    /// Osmosis and Terra share index 5 there. Only use this when talking to
    /// that program; everywhere else the two are distinct.
    pub fn legacy_index(&self) -> u8 {
        match self {
            Ecosystem::Discord => 0,
            Ecosystem::Solana => 1,
            Ecosystem::Ethereum => 2,
            Ecosystem::Sui => 3,
            Ecosystem::Aptos => 4,
            Ecosystem::Osmosis | Ecosystem::Terra => 5,
            Ecosystem::Injective => 6,
            Ecosystem::Algorand => 7,
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ecosystem {
    type Err = UnknownEcosystem;

    /// Case-insensitive, full names only. Hint prefixes like `s` or `a` are
    /// handled by the classifier, not here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Ecosystem::ALL
            .iter()
            .copied()
            .find(|eco| eco.name() == lower)
            .ok_or_else(|| UnknownEcosystem(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_chain_codes_are_distinct() {
        let codes: HashSet<u16> = Ecosystem::ALL.iter().map(|e| e.default_chain_code()).collect();
        assert_eq!(codes.len(), Ecosystem::ALL.len());
    }

    #[test]
    fn test_known_chain_codes() {
        assert_eq!(Ecosystem::Discord.default_chain_code(), 14443);
        assert_eq!(Ecosystem::Ethereum.default_chain_code(), 2);
        assert_eq!(Ecosystem::Algorand.default_chain_code(), 8);
    }

    #[test]
    fn test_legacy_index_overlap_is_limited_to_cosmos_pair() {
        assert_eq!(Ecosystem::Osmosis.legacy_index(), Ecosystem::Terra.legacy_index());
        let indexes: HashSet<u8> = Ecosystem::ALL.iter().map(|e| e.legacy_index()).collect();
        assert_eq!(indexes.len(), Ecosystem::ALL.len() - 1);
        assert_ne!(Ecosystem::Osmosis, Ecosystem::Terra);
    }

    #[test]
    fn test_name_roundtrip() {
        for eco in Ecosystem::ALL {
            assert_eq!(eco.to_string().parse::<Ecosystem>(), Ok(eco));
        }
        assert_eq!("SUI".parse::<Ecosystem>(), Ok(Ecosystem::Sui));
        assert!("s".parse::<Ecosystem>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Ecosystem::Injective).unwrap(), "\"injective\"");
        let eco: Ecosystem = serde_json::from_str("\"aptos\"").unwrap();
        assert_eq!(eco, Ecosystem::Aptos);
    }
}
