//! Line sources: where the hasher gets its lines from.
//!
//! A [`LineSource`] opens a path and yields its lines lazily, newline-stripped
//! and in file order. Dropping the returned iterator releases the underlying
//! resource, so early returns and `?` never leak a handle.

mod file;
mod lines;

pub use file::{DefaultEncoding, FileLineSource};
pub use lines::DecodedLines;

use std::path::Path;

use crate::error::FingerprintError;

pub trait LineSource {
    type Lines: Iterator<Item = Result<String, FingerprintError>>;

    /// Open `path` for line-by-line reading.
    ///
    /// A present, non-blank `encoding` label overrides the source's default
    /// encoding.
    fn open(&self, path: &Path, encoding: Option<&str>) -> Result<Self::Lines, FingerprintError>;
}

impl<S: LineSource + ?Sized> LineSource for &S {
    type Lines = S::Lines;

    fn open(&self, path: &Path, encoding: Option<&str>) -> Result<Self::Lines, FingerprintError> {
        (**self).open(path, encoding)
    }
}
