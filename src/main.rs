//! # manifestgen
//!
//! Generates Kubernetes manifests from an asset directory holding `install-config.yaml`.
//!
//! ## Usage
//!
//! ```bash
//! # Generate manifests/user-ca-bundle-config.yaml below ./cluster
//! manifestgen create manifests --dir ./cluster
//!
//! # Same, with JSON logs at debug level
//! manifestgen create manifests --dir ./cluster --log-format json --log-level debug
//! ```
//!
//! When the install config has no `additionalTrustBundle`, nothing is written.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use trust_bundle_manifests::asset::manifests::AdditionalTrustBundleConfig;
use trust_bundle_manifests::asset::{Asset, Store};
use trust_bundle_manifests::config::{GeneratorConfig, LogFormat};
use trust_bundle_manifests::logging::init_logging;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    ", built ",
    env!("BUILD_DATETIME"),
    ")"
);

/// Manifest generator CLI
#[derive(Parser)]
#[command(name = "manifestgen", version = VERSION, about = "Generate cluster manifests from install-config.yaml", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Asset directory holding install-config.yaml (defaults to ASSET_DIR or ".")
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Log level (defaults to LOG_LEVEL or INFO)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format: text or json (defaults to LOG_FORMAT or text)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a target
    Create {
        #[command(subcommand)]
        target: Target,
    },
}

#[derive(Subcommand)]
enum Target {
    /// Generate the Kubernetes manifests
    Manifests,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = GeneratorConfig::from_env();
    if let Some(dir) = cli.dir {
        config.asset_dir = dir;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }
    if let Some(log_format) = cli.log_format {
        config.log_format = log_format;
    }

    init_logging(&config)?;
    info!(
        "manifestgen {}, asset directory {}",
        VERSION,
        config.asset_dir.display()
    );

    match cli.command {
        Commands::Create {
            target: Target::Manifests,
        } => create_manifests(&config),
    }
}

fn create_manifests(config: &GeneratorConfig) -> Result<()> {
    let mut store = Store::new(&config.asset_dir);
    let mut trust_bundle = AdditionalTrustBundleConfig::default();

    store
        .fetch(&mut trust_bundle)
        .with_context(|| format!("Failed to fetch {}", trust_bundle.name()))?;

    let written = store
        .persist(&trust_bundle)
        .with_context(|| format!("Failed to write {}", trust_bundle.name()))?;

    if written.is_empty() {
        info!("{} disabled, no manifest written", trust_bundle.name());
    }
    for path in written {
        info!("Wrote {}", path.display());
    }
    Ok(())
}
