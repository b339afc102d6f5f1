//! Hash command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::utils::{build_hasher, HashingArgs};
use context_hash::batch::{render_records, FingerprintRecord};

#[derive(Args)]
pub struct HashArgs {
    /// Source file containing the warning
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Line of the warning (0-based unless --line-base one)
    #[arg(value_name = "LINE")]
    pub line: usize,

    /// Encoding of the file (defaults to the configured default encoding)
    #[arg(short, long, value_name = "ENCODING")]
    pub encoding: Option<String>,

    /// Print a JSON record instead of the bare fingerprint
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub hashing: HashingArgs,
}

pub fn run(args: HashArgs, config_path: Option<&Path>) -> Result<()> {
    let hasher = build_hasher(&args.hashing, config_path)?;

    let fingerprint = hasher
        .compute(&args.path, args.line, args.encoding.as_deref())
        .with_context(|| format!("Failed to fingerprint {}:{}", args.path.display(), args.line))?;

    if args.json {
        let record = FingerprintRecord {
            path: args.path,
            line: args.line,
            fingerprint: Some(fingerprint),
            error: None,
            error_kind: None,
        };
        print!("{}", render_records(&[record])?);
    } else {
        println!("{}", fingerprint);
    }

    Ok(())
}
