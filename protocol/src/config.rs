//! # Deployment Configuration & Constants
//!
//! Every identifier ADH derives against lives here. The defaults describe
//! the production W token deployment; any of them can be overridden from a
//! TOML file or the command line, so pointing ADH at a devnet deployment is
//! a config change, not a recompile.
//!
//! A config file looks like this (every key optional):
//!
//! ```toml
//! base_url = "https://prod-flat-files-min.wormhole.com"
//! timeout_ms = 10000
//! receipt_program = "Wapq3Hpv2aSKjWrh4pM8eweh8jVJB7D1nLBw9ikjVYx"
//! mint = "85VBFQZC9TZkfaptBWjvUw7YbZjy52A6mjtPGjstQAmQ"
//! token_program = "TokenkegQfeZyiNwAJbNbGkPTVKZpzsEjM5yKdx4iUX"
//! associated_token_program = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL"
//!
//! [chain_codes]
//! discord = 14443
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::crypto::Pubkey;
use crate::identity::{Ecosystem, UnknownEcosystem};

// ---------------------------------------------------------------------------
// Program & Mint Identifiers
// ---------------------------------------------------------------------------

/// The token-grant program that owns receipt accounts.
pub const DEFAULT_RECEIPT_PROGRAM: &str = "Wapq3Hpv2aSKjWrh4pM8eweh8jVJB7D1nLBw9ikjVYx";

/// The W token mint.
pub const DEFAULT_MINT: &str = "85VBFQZC9TZkfaptBWjvUw7YbZjy52A6mjtPGjstQAmQ";

/// SPL Token program.
pub const DEFAULT_TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGkPTVKZpzsEjM5yKdx4iUX";

/// SPL Associated Token Account program.
pub const DEFAULT_ASSOCIATED_TOKEN_PROGRAM: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

// ---------------------------------------------------------------------------
// Receipt Store
// ---------------------------------------------------------------------------

/// Flat-file host serving one JSON document per identity.
pub const DEFAULT_BASE_URL: &str = "https://prod-flat-files-min.wormhole.com";

/// Per-request timeout. The files are tiny; if it takes longer than this,
/// the host is not going to answer.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Seed that prefixes every receipt-account derivation.
pub const RECEIPT_SEED: &[u8] = b"receipt";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid {field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    #[error("no chain code configured for {0}")]
    MissingChainCode(Ecosystem),
}

// ---------------------------------------------------------------------------
// DeploymentConfig
// ---------------------------------------------------------------------------

/// The identifiers and endpoints one deployment derives against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub receipt_program: Pubkey,
    pub associated_token_program: Pubkey,
    pub token_program: Pubkey,
    pub mint: Pubkey,
    pub base_url: String,
    pub timeout: Duration,
    pub chain_codes: BTreeMap<Ecosystem, u16>,
}

/// On-disk shape. Everything optional so a file only has to mention what
/// it changes.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    receipt_program: Option<Pubkey>,
    associated_token_program: Option<Pubkey>,
    token_program: Option<Pubkey>,
    mint: Option<Pubkey>,
    base_url: Option<String>,
    timeout_ms: Option<u64>,
    #[serde(default)]
    chain_codes: BTreeMap<String, u16>,
}

fn default_pubkey(text: &'static str) -> Pubkey {
    // Compile-time constants above; covered by test_defaults_parse.
    text.parse().unwrap_or_default()
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            receipt_program: default_pubkey(DEFAULT_RECEIPT_PROGRAM),
            associated_token_program: default_pubkey(DEFAULT_ASSOCIATED_TOKEN_PROGRAM),
            token_program: default_pubkey(DEFAULT_TOKEN_PROGRAM),
            mint: default_pubkey(DEFAULT_MINT),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            chain_codes: Ecosystem::ALL
                .iter()
                .map(|eco| (*eco, eco.default_chain_code()))
                .collect(),
        }
    }
}

impl DeploymentConfig {
    /// Parse a TOML document on top of the defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = Self::default();
        config.apply_file(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file on top of the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded deployment config");
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) -> Result<(), ConfigError> {
        if let Some(key) = file.receipt_program {
            self.receipt_program = key;
        }
        if let Some(key) = file.associated_token_program {
            self.associated_token_program = key;
        }
        if let Some(key) = file.token_program {
            self.token_program = key;
        }
        if let Some(key) = file.mint {
            self.mint = key;
        }
        if let Some(url) = file.base_url {
            self.base_url = url;
        }
        if let Some(ms) = file.timeout_ms {
            self.timeout = Duration::from_millis(ms);
        }
        for (name, code) in file.chain_codes {
            let eco: Ecosystem = name.parse().map_err(|e: UnknownEcosystem| {
                ConfigError::InvalidValue {
                    field: "chain_codes",
                    message: e.to_string(),
                }
            })?;
            self.chain_codes.insert(eco, code);
        }
        Ok(())
    }

    /// Reject configurations that cannot possibly work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                message: "must not be empty".to_string(),
            });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                message: format!("'{}' is not an http(s) URL", self.base_url),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Chain code for an ecosystem.
    pub fn chain_code(&self, ecosystem: Ecosystem) -> Result<u16, ConfigError> {
        self.chain_codes
            .get(&ecosystem)
            .copied()
            .ok_or(ConfigError::MissingChainCode(ecosystem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_parse() {
        // default_pubkey falls back to all-zeroes on a typo; make sure it never does.
        for text in [
            DEFAULT_RECEIPT_PROGRAM,
            DEFAULT_MINT,
            DEFAULT_TOKEN_PROGRAM,
            DEFAULT_ASSOCIATED_TOKEN_PROGRAM,
        ] {
            let key: Pubkey = text.parse().unwrap();
            assert_ne!(key, Pubkey::default());
        }
        let config = DeploymentConfig::default();
        assert_eq!(config.receipt_program.to_string(), DEFAULT_RECEIPT_PROGRAM);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_chain_table_is_complete() {
        let config = DeploymentConfig::default();
        for eco in Ecosystem::ALL {
            assert_eq!(config.chain_code(eco).unwrap(), eco.default_chain_code());
        }
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            DeploymentConfig::from_toml_str("").unwrap(),
            DeploymentConfig::default()
        );
    }

    #[test]
    fn test_toml_overrides() {
        let text = r#"
            base_url = "http://localhost:8080/files/"
            timeout_ms = 250
            mint = "So11111111111111111111111111111111111111112"

            [chain_codes]
            discord = 9999
            Terra = 18
        "#;
        let config = DeploymentConfig::from_toml_str(text).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/files/");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.mint.to_string(), "So11111111111111111111111111111111111111112");
        assert_eq!(config.chain_code(Ecosystem::Discord).unwrap(), 9999);
        assert_eq!(config.chain_code(Ecosystem::Terra).unwrap(), 18);
        // Untouched entries keep their defaults.
        assert_eq!(config.chain_code(Ecosystem::Solana).unwrap(), 1);
        assert_eq!(config.receipt_program.to_string(), DEFAULT_RECEIPT_PROGRAM);
    }

    #[test]
    fn test_unknown_ecosystem_rejected() {
        let err = DeploymentConfig::from_toml_str("[chain_codes]\ncardano = 15\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "chain_codes", .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = DeploymentConfig::from_toml_str("base_uri = \"https://x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_bad_pubkey_rejected() {
        let err = DeploymentConfig::from_toml_str("mint = \"not base58!\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation() {
        assert!(DeploymentConfig::from_toml_str("base_url = \"\"\n").is_err());
        assert!(DeploymentConfig::from_toml_str("base_url = \"ftp://x\"\n").is_err());
        assert!(DeploymentConfig::from_toml_str("timeout_ms = 0\n").is_err());
    }

    #[test]
    fn test_missing_chain_code() {
        let mut config = DeploymentConfig::default();
        config.chain_codes.remove(&Ecosystem::Algorand);
        assert!(matches!(
            config.chain_code(Ecosystem::Algorand),
            Err(ConfigError::MissingChainCode(Ecosystem::Algorand))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_ms = 1500").unwrap();
        let config = DeploymentConfig::load(file.path()).unwrap();
        assert_eq!(config.timeout, Duration::from_millis(1500));

        let missing = DeploymentConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
