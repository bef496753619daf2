//! # Structured Logging
//!
//! Installs the `tracing` subscriber for the `adh` binary. Output format is
//! pretty or JSON lines, filtered by `RUST_LOG` when set.
//!
//! Everything goes to stderr. Stdout carries the derived addresses and
//! nothing else, so `adh ... | cut -d' ' -f2` keeps working with `-v`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used without `-v`: only problems.
pub const QUIET_FILTER: &str = "warn";

/// Filter used with `-v`: the derivation trace from both crates.
pub const VERBOSE_FILTER: &str = "adh=debug,adh_protocol=debug,warn";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, colored output.
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Accepts "json" or "pretty" (case-insensitive). Anything else is
    /// `Pretty`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once, early in `main()`. `RUST_LOG` overrides `default_level` using
/// the usual `EnvFilter` syntax:
///
/// ```text
/// RUST_LOG=adh_protocol=debug adh 468526016151814164
/// ```
pub fn init_logging(default_level: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(false),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
                .init();
        }
    }

    tracing::debug!("logging initialized (format={:?})", format);
}
