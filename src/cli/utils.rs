//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

use context_hash::config::{load_config, merge_cli_with_config, CliOverrides};
use context_hash::{ContextHasher, LineBase};

/// Flags that shape fingerprinting, shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct HashingArgs {
    /// Lines included before and after the warning line
    #[arg(long, value_name = "LINES")]
    pub lookahead: Option<usize>,

    /// Encoding for files without an explicit one ("auto" to detect)
    #[arg(long, value_name = "ENCODING")]
    pub default_encoding: Option<String>,

    /// Numbering convention of the given line numbers
    #[arg(long, value_name = "BASE")]
    pub line_base: Option<LineBase>,
}

/// Load the config file, apply CLI flags over it and build the hasher.
pub fn build_hasher(args: &HashingArgs, config_path: Option<&Path>) -> Result<ContextHasher> {
    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    let config = load_config(&cwd, config_path)?;
    let config = merge_cli_with_config(
        config,
        CliOverrides {
            lookahead: args.lookahead,
            default_encoding: args.default_encoding.clone(),
            line_base: args.line_base,
        },
    );
    tracing::debug!("Effective config: {:?}", config);

    ContextHasher::from_config(&config).context("Invalid hashing configuration")
}
