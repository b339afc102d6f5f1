//! Core data types shared by the hasher, the config loader and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::java_string_hash;

/// Integer summary of a context window.
///
/// Serialized as a plain JSON number so records stay compatible with trackers
/// that store fingerprints as 32-bit integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(i32);

impl Fingerprint {
    /// Fingerprint of an empty context window.
    pub const EMPTY: Fingerprint = Fingerprint(0);

    /// Hash an accumulated context window.
    pub fn of(context: &str) -> Self {
        Self(java_string_hash(context))
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Fingerprint {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<Fingerprint> for i32 {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numbering convention of the line numbers handed to the hasher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineBase {
    /// Line 0 is the first line of the file.
    #[default]
    Zero,
    /// Line 1 is the first line of the file, as printed by most compilers.
    One,
}

impl LineBase {
    /// Convert a caller-supplied line number to a 0-based line index.
    ///
    /// Line 0 under the 1-based convention has no meaning and maps to index 0.
    pub fn to_index(self, line: usize) -> usize {
        match self {
            LineBase::Zero => line,
            LineBase::One => line.saturating_sub(1),
        }
    }
}

/// Settings that shape how fingerprints are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lines included before and after the target line.
    pub lookahead: usize,
    /// Encoding used when a warning carries no encoding of its own.
    /// `"auto"` detects the encoding per file.
    pub default_encoding: String,
    pub line_base: LineBase,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookahead: crate::fingerprint::DEFAULT_LOOKAHEAD,
            default_encoding: "utf-8".to_string(),
            line_base: LineBase::Zero,
        }
    }
}
