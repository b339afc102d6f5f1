//! Batch command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use super::utils::{build_hasher, HashingArgs};
use context_hash::batch::{fingerprint_all, read_warnings, render_records};

#[derive(Args)]
pub struct BatchArgs {
    /// JSON Lines file of warnings ("-" or omitted reads stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Resolve relative warning paths against this directory
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Write records to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with an error if any warning could not be fingerprinted
    #[arg(long)]
    pub fail_on_error: bool,

    #[command(flatten)]
    pub hashing: HashingArgs,
}

pub fn run(args: BatchArgs, config_path: Option<&Path>) -> Result<()> {
    let hasher = build_hasher(&args.hashing, config_path)?;

    let warnings = match args.input.as_deref() {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open warnings file {}", path.display()))?;
            read_warnings(BufReader::new(file))?
        }
        _ => read_warnings(io::stdin().lock())?,
    };

    if let Some(root) = &args.root {
        if !root.is_dir() {
            anyhow::bail!("Root is not a directory: {}", root.display());
        }
    }

    let records = fingerprint_all(&hasher, args.root.as_deref(), &warnings);
    let rendered = render_records(&records)?;

    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed writing records to {}", path.display()))?,
        None => print!("{}", rendered),
    }

    let failed = records.iter().filter(|record| record.is_error()).count();
    if args.fail_on_error && failed > 0 {
        anyhow::bail!("{} of {} warnings could not be fingerprinted", failed, records.len());
    }

    Ok(())
}
