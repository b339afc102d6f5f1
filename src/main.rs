//! context-hash: compute warning fingerprints from source context
//!
//! Thin binary over the `context_hash` library; see `cli` for the commands.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
