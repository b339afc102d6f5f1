//! Batch fingerprinting of many warnings.
//!
//! Input and output are JSON Lines. Each input line names one warning:
//!
//! ```text
//! {"path": "src/main.rs", "line": 41, "encoding": "utf-8"}
//! ```
//!
//! Each output line carries either the fingerprint or the error for the
//! warning on the same input position.

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::domain::Fingerprint;
use crate::error::{ErrorKind, FingerprintError};
use crate::fingerprint::ContextHasher;
use crate::source::LineSource;

/// A warning to fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningLocation {
    pub path: PathBuf,
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

/// Outcome for one [`WarningLocation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintRecord {
    pub path: PathBuf,
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Fingerprint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl FingerprintRecord {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    fn from_result(warning: &WarningLocation, result: Result<Fingerprint, FingerprintError>) -> Self {
        let (fingerprint, error, error_kind) = match result {
            Ok(fingerprint) => (Some(fingerprint), None, None),
            Err(err) => {
                let kind = match err.kind() {
                    ErrorKind::NotFound => "not_found",
                    ErrorKind::Io => "io",
                };
                (None, Some(err.to_string()), Some(kind.to_string()))
            }
        };
        Self { path: warning.path.clone(), line: warning.line, fingerprint, error, error_kind }
    }
}

/// Parse JSON Lines warnings. Blank lines are skipped.
pub fn read_warnings(reader: impl BufRead) -> Result<Vec<WarningLocation>> {
    let mut warnings = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed reading warnings at line {}", idx + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let warning: WarningLocation = serde_json::from_str(&line)
            .with_context(|| format!("Invalid warning record at line {}", idx + 1))?;
        warnings.push(warning);
    }
    Ok(warnings)
}

/// Fingerprint every warning in parallel.
///
/// Relative paths are resolved against `root` when one is given. Records come
/// back in input order; a failing warning gets an error record and does not
/// affect the others.
pub fn fingerprint_all<S>(
    hasher: &ContextHasher<S>,
    root: Option<&Path>,
    warnings: &[WarningLocation],
) -> Vec<FingerprintRecord>
where
    S: LineSource + Sync,
{
    let records: Vec<FingerprintRecord> = warnings
        .par_iter()
        .map(|warning| {
            let path = match root {
                Some(root) if warning.path.is_relative() => root.join(&warning.path),
                _ => warning.path.clone(),
            };
            let result = hasher.compute(&path, warning.line, warning.encoding.as_deref());
            if let Err(err) = &result {
                tracing::debug!("Failed to fingerprint {}:{}: {}", path.display(), warning.line, err);
            }
            FingerprintRecord::from_result(warning, result)
        })
        .collect();

    let failed = records.iter().filter(|record| record.is_error()).count();
    if failed > 0 {
        tracing::warn!("{} of {} warnings could not be fingerprinted", failed, records.len());
    }
    records
}

/// Render records as JSON Lines.
pub fn render_records(records: &[FingerprintRecord]) -> Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record).context("Failed to serialize record")?);
        out.push('\n');
    }
    Ok(out)
}
