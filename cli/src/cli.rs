//! # CLI Interface
//!
//! Argument structure for `adh`, via `clap` derive.
//!
//! The common case has no subcommand name at all: `adh <identity> [hint]`
//! resolves a replay address. Those are ordinary top-level positionals, so
//! flags parse the same before or after them. Once a positional is seen,
//! `ata` and `classify` are no longer subcommands.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use adh_protocol::crypto::Pubkey;
use adh_protocol::identity::Identity;
use adh_protocol::DeploymentConfig;

/// Address Derivation Helper.
///
/// Works out where a receipt or token account lives for a chat handle,
/// chain address or wallet key.
#[derive(Parser, Debug)]
#[command(
    name = "adh",
    about = "Derive replay and token account addresses",
    version,
    propagate_version = true,
    args_conflicts_with_subcommands = true,
    override_usage = "adh [OPTIONS] <IDENTITY> [HINT]\n       adh [OPTIONS] <COMMAND>"
)]
pub struct AdhCli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Discord ID, chain address or wallet key to resolve.
    pub identity: Option<String>,

    /// `s`/`sui` or `a`/`aptos`, for 32-byte hex addresses.
    pub hint: Option<String>,

    /// Print a JSON object instead of the `Label: address` line.
    #[arg(long, global = true)]
    pub json: bool,

    /// Use this hex preimage instead of fetching the flat file.
    #[arg(long, global = true, value_name = "HEX")]
    pub preimage: Option<String>,

    /// Log the derivation steps to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: String,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

impl AdhCli {
    /// The `<identity> [hint]` pair, when no subcommand was given.
    pub fn replay_identity(&self) -> Option<Identity> {
        self.identity
            .as_deref()
            .map(|raw| Identity::new(raw, self.hint.as_deref()))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive the associated token account of the configured mint for an
    /// owner.
    Ata {
        /// Base58 owner address.
        owner: String,
    },
    /// Show how an identity is classified and which flat file it maps to,
    /// without fetching anything.
    Classify {
        identity: String,
        /// `s`/`sui` or `a`/`aptos`, for 32-byte hex addresses.
        hint: Option<String>,
    },
}

/// Per-invocation overrides on top of the built-in production deployment.
///
/// Applied in order: defaults, then `--config` file, then these flags (or
/// their environment variables).
#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// TOML deployment file.
    #[arg(long, short = 'c', global = true, env = "ADH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Flat-file host to fetch preimages from.
    #[arg(long, global = true, env = "ADH_BASE_URL")]
    pub base_url: Option<String>,

    /// Program that owns receipt accounts.
    #[arg(long, global = true, env = "ADH_RECEIPT_PROGRAM")]
    pub receipt_program: Option<Pubkey>,

    /// Token mint for `ata`.
    #[arg(long, global = true, env = "ADH_MINT")]
    pub mint: Option<Pubkey>,

    /// Token program for `ata`.
    #[arg(long, global = true, env = "ADH_TOKEN_PROGRAM")]
    pub token_program: Option<Pubkey>,

    /// Associated token account program for `ata`.
    #[arg(long, global = true, env = "ADH_ASSOCIATED_TOKEN_PROGRAM")]
    pub associated_token_program: Option<Pubkey>,

    /// Flat-file request timeout in milliseconds.
    #[arg(long, global = true, env = "ADH_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Overwrite every field of `config` that was given on the command line.
    pub fn apply(&self, mut config: DeploymentConfig) -> DeploymentConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(program) = self.receipt_program {
            config.receipt_program = program;
        }
        if let Some(mint) = self.mint {
            config.mint = mint;
        }
        if let Some(program) = self.token_program {
            config.token_program = program;
        }
        if let Some(program) = self.associated_token_program {
            config.associated_token_program = program;
        }
        if let Some(ms) = self.timeout_ms {
            config.timeout = Duration::from_millis(ms);
        }
        config
    }
}
