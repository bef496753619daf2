// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # adh
//!
//! Entry point for the `adh` binary. Parses arguments, builds the
//! deployment configuration, initializes logging, and runs one of:
//!
//! - `adh <identity> [hint]`       — fetch the preimage, print the replay address
//! - `adh ata <owner>`             — print the associated token account
//! - `adh classify <identity> [h]` — dry run: classification and flat-file URL
//!
//! Results go to stdout. Errors print `failed with error:` and the error
//! chain to stderr and exit non-zero.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use serde::Serialize;
use std::process::ExitCode;

use adh_protocol::crypto::Pubkey;
use adh_protocol::identity::{Ecosystem, Identity};
use adh_protocol::pipeline::{ReplayAddressPipeline, TokenAccountPipeline};
use adh_protocol::preimage::{HttpPreimageSource, PreimageSource, StaticPreimageSource};
use adh_protocol::{AdhError, DeploymentConfig};

use cli::{AdhCli, Commands, ConfigOverrides};
use logging::LogFormat;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = AdhCli::parse();

    let replay = cli.replay_identity();
    if cli.command.is_none() && replay.is_none() {
        // Bare `adh` is a request for help, not a mistake.
        if let Err(e) = AdhCli::command().print_help() {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
        println!();
        return ExitCode::SUCCESS;
    }

    let filter = if cli.verbose {
        logging::VERBOSE_FILTER
    } else {
        logging::QUIET_FILTER
    };
    logging::init_logging(filter, LogFormat::from_str_lossy(&cli.log_format));

    let outcome = match (cli.command, replay) {
        (Some(Commands::Ata { owner }), _) => load_config(&cli.overrides)
            .and_then(|config| derive_token_account(&config, &owner, cli.json)),
        (Some(Commands::Classify { identity, hint }), _) => {
            load_config(&cli.overrides).and_then(|config| {
                classify_identity(&config, &Identity::new(identity, hint.as_deref()), cli.json)
            })
        }
        (None, Some(identity)) => match load_config(&cli.overrides) {
            Ok(config) => {
                resolve_replay_address(config, &identity, cli.preimage.as_deref(), cli.json).await
            }
            Err(e) => Err(e),
        },
        (None, None) => Ok(()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("failed with error:");
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Defaults, then the `--config` file, then flag and environment overrides.
fn load_config(overrides: &ConfigOverrides) -> Result<DeploymentConfig> {
    let base = match &overrides.config {
        Some(path) => DeploymentConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => DeploymentConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate().context("invalid configuration")?;
    tracing::debug!(
        base_url = %config.base_url,
        receipt_program = %config.receipt_program,
        mint = %config.mint,
        "configuration loaded"
    );
    Ok(config)
}

// ---------------------------------------------------------------------------
// Replay address
// ---------------------------------------------------------------------------

async fn resolve_replay_address(
    config: DeploymentConfig,
    identity: &Identity,
    preimage_hex: Option<&str>,
    json: bool,
) -> Result<()> {
    match preimage_hex {
        Some(hex) => {
            let source = StaticPreimageSource::from_hex(hex).map_err(AdhError::from)?;
            resolve_with(config, source, identity, json).await
        }
        None => {
            let source = HttpPreimageSource::new(config.base_url.clone(), config.timeout)
                .map_err(AdhError::from)?;
            resolve_with(config, source, identity, json).await
        }
    }
}

async fn resolve_with<S: PreimageSource>(
    config: DeploymentConfig,
    source: S,
    identity: &Identity,
    json: bool,
) -> Result<()> {
    let pipeline = ReplayAddressPipeline::new(config, source);
    let resolution = pipeline.resolve(identity).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        println!("ReplayAddress: {}", resolution.replay_address);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Token account
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct TokenAccountOutput {
    owner: Pubkey,
    mint: Pubkey,
    ata: Pubkey,
    bump: u8,
}

fn derive_token_account(config: &DeploymentConfig, owner: &str, json: bool) -> Result<()> {
    let owner: Pubkey = owner.trim().parse().map_err(AdhError::from)?;
    let pipeline = TokenAccountPipeline::from_config(config);
    let derived = pipeline.derive(&owner).map_err(AdhError::from)?;

    if json {
        let output = TokenAccountOutput {
            owner,
            mint: *pipeline.mint(),
            ata: derived.address,
            bump: derived.bump,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("ATA: {}", derived.address);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Classification dry run
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ClassificationOutput {
    address: String,
    ecosystem: Ecosystem,
    chain_code: u16,
    url: String,
}

fn classify_identity(config: &DeploymentConfig, identity: &Identity, json: bool) -> Result<()> {
    let canonical = identity.classify().map_err(AdhError::from)?;
    let chain_code = config
        .chain_code(canonical.ecosystem)
        .map_err(AdhError::from)?;
    let output = ClassificationOutput {
        url: adh_protocol::preimage::flat_file_url(&config.base_url, &canonical.address, chain_code),
        address: canonical.address,
        ecosystem: canonical.ecosystem,
        chain_code,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Address:    {}", output.address);
        println!("Ecosystem:  {}", output.ecosystem.label());
        println!("Chain code: {}", output.chain_code);
        println!("Flat file:  {}", output.url);
    }
    Ok(())
}
