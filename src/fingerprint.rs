//! Context fingerprinting of warnings.
//!
//! The fingerprint of a warning at line `n` is the hash of lines
//! `n - lookahead ..= n + lookahead` (0-based, clamped to the file),
//! concatenated without separators. Edits elsewhere in the file shift the
//! warning's line number but leave its window, and so its fingerprint, alone.

use std::path::Path;

use crate::domain::{Config, Fingerprint, LineBase};
use crate::error::FingerprintError;
use crate::source::{DefaultEncoding, FileLineSource, LineSource};

/// Lines included before and after the target line.
pub const DEFAULT_LOOKAHEAD: usize = 3;

const CONTEXT_CAPACITY: usize = 1000;

/// Fingerprint the context of the warning at 0-based `line` of `path`.
///
/// `encoding` names the file's text encoding; `None` or a blank label decodes
/// as UTF-8. Uses a look-ahead of [`DEFAULT_LOOKAHEAD`].
pub fn compute_fingerprint(
    path: impl AsRef<Path>,
    line: usize,
    encoding: Option<&str>,
) -> Result<Fingerprint, FingerprintError> {
    ContextHasher::new().compute(path.as_ref(), line, encoding)
}

/// Computes fingerprints from the lines a [`LineSource`] yields.
#[derive(Debug, Clone)]
pub struct ContextHasher<S = FileLineSource> {
    source: S,
    lookahead: usize,
    line_base: LineBase,
}

impl Default for ContextHasher {
    fn default() -> Self {
        Self::with_source(FileLineSource::default())
    }
}

impl ContextHasher {
    /// File-backed hasher with UTF-8 as the default encoding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a file-backed hasher from loaded settings.
    ///
    /// Fails if `default_encoding` is neither `"auto"` nor a known label.
    pub fn from_config(config: &Config) -> Result<Self, FingerprintError> {
        let default_encoding = DefaultEncoding::from_label(&config.default_encoding)?;
        Ok(Self::with_source(FileLineSource::new(default_encoding))
            .lookahead(config.lookahead)
            .line_base(config.line_base))
    }
}

impl<S: LineSource> ContextHasher<S> {
    pub fn with_source(source: S) -> Self {
        Self { source, lookahead: DEFAULT_LOOKAHEAD, line_base: LineBase::Zero }
    }

    pub fn lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn line_base(mut self, line_base: LineBase) -> Self {
        self.line_base = line_base;
        self
    }

    #[cfg(test)]
    fn source(&self) -> &S {
        &self.source
    }

    /// Fingerprint the context of the warning at `line` of `path`.
    ///
    /// `line` is interpreted according to the configured [`LineBase`]. It is
    /// not checked against the file length: a line past the end yields a
    /// shorter (possibly empty) window rather than an error.
    pub fn compute(
        &self,
        path: &Path,
        line: usize,
        encoding: Option<&str>,
    ) -> Result<Fingerprint, FingerprintError> {
        let index = self.line_base.to_index(line);
        let lines = self.source.open(path, encoding)?;
        let context = collect_window(lines, index, self.lookahead)?;
        let fingerprint = Fingerprint::of(&context);

        tracing::debug!(
            "Fingerprint {} for {}:{} ({} context chars)",
            fingerprint,
            path.display(),
            line,
            context.chars().count()
        );
        Ok(fingerprint)
    }
}

/// Concatenate the lines of the window around 0-based `line`.
///
/// Lines are consumed in order and iteration stops at the last line of the
/// window, so nothing after it is read. The iterator is dropped before this
/// returns, on success and on error alike.
pub fn collect_window<I>(lines: I, line: usize, lookahead: usize) -> Result<String, FingerprintError>
where
    I: IntoIterator<Item = Result<String, FingerprintError>>,
{
    let first = line.saturating_sub(lookahead);
    let last = line.saturating_add(lookahead);

    let mut context = String::with_capacity(CONTEXT_CAPACITY);
    for (index, current) in lines.into_iter().enumerate() {
        let current = current?;
        if index >= first {
            context.push_str(&current);
        }
        if index >= last {
            break;
        }
    }
    Ok(context)
}
