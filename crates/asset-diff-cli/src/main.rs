// Copyright 2026 Oxide Computer Company

//! Diff a binary asset against its last committed revision.
//!
//! Intended for assets that can't be diffed from the editor directly, for
//! example when the Content directory is a separate repository or
//! submodule.

use anyhow::{Context, Result};
use asset_diff_vcs::AssetDiff;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "asset-diff")]
#[command(
    about = "Diff a binary asset against its last committed revision",
    long_about = "Diff a binary asset (e.g. a .uasset) against its last \
                  committed revision using a visual diff tool. Works for \
                  assets stored inline in Git and for Git LFS assets."
)]
struct Cli {
    /// Path to the asset, relative to the current directory
    asset: Utf8PathBuf,

    /// Print debug output (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    /// Diff tool executable (defaults to $UE_DIFF_BIN)
    #[arg(long, value_name = "PATH")]
    diff_bin: Option<Utf8PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir()
        .context("failed to read current directory")?;
    let cwd = Utf8PathBuf::try_from(cwd)
        .context("current directory is not valid UTF-8")?;
    debug!(%cwd, asset = %cli.asset, "starting");

    run(&cwd, &cli.asset, cli.diff_bin)
}

fn run(
    cwd: &Utf8Path,
    asset: &Utf8Path,
    diff_bin: Option<Utf8PathBuf>,
) -> Result<()> {
    let asset_diff = AssetDiff::standard(cwd, diff_bin)?;
    asset_diff
        .run(cwd, asset)
        .with_context(|| format!("failed to diff {asset}"))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
