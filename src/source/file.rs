//! File-backed line source

use encoding_rs::{Decoder, Encoding, UTF_8};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use super::{DecodedLines, LineSource};
use crate::error::FingerprintError;
use crate::utils::{detect_encoding, resolve_encoding_label, DEFAULT_SAMPLE_SIZE};

/// Encoding applied when a caller passes no encoding label (or a blank one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultEncoding {
    /// Always decode with this encoding. A BOM for another Unicode encoding
    /// still wins.
    Fixed(&'static Encoding),
    /// Sniff each file's leading bytes.
    Detect,
}

impl Default for DefaultEncoding {
    fn default() -> Self {
        DefaultEncoding::Fixed(UTF_8)
    }
}

impl DefaultEncoding {
    /// Parse a config value: `"auto"` selects detection, anything else must
    /// be an encoding label.
    pub fn from_label(label: &str) -> Result<Self, FingerprintError> {
        let label = label.trim();
        if label.is_empty() {
            return Ok(Self::default());
        }
        if label.eq_ignore_ascii_case("auto") {
            return Ok(DefaultEncoding::Detect);
        }
        resolve_encoding_label(label).map(DefaultEncoding::Fixed)
    }
}

/// Reads lines from files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLineSource {
    default_encoding: DefaultEncoding,
}

impl FileLineSource {
    pub fn new(default_encoding: DefaultEncoding) -> Self {
        Self { default_encoding }
    }

    fn decoder_for(
        &self,
        file: &mut File,
        path: &Path,
        encoding: Option<&str>,
    ) -> Result<Decoder, FingerprintError> {
        if let Some(label) = encoding.filter(|label| !label.trim().is_empty()) {
            return Ok(resolve_encoding_label(label)?.new_decoder_with_bom_removal());
        }

        match self.default_encoding {
            DefaultEncoding::Fixed(encoding) => Ok(encoding.new_decoder()),
            DefaultEncoding::Detect => {
                let encoding = sniff(file)
                    .map_err(|source| FingerprintError::Io { path: path.to_path_buf(), source })?;
                tracing::debug!("Detected {} for {}", encoding.name(), path.display());
                Ok(encoding.new_decoder_with_bom_removal())
            }
        }
    }
}

impl LineSource for FileLineSource {
    type Lines = DecodedLines<File>;

    fn open(&self, path: &Path, encoding: Option<&str>) -> Result<Self::Lines, FingerprintError> {
        let mut file = File::open(path)
            .map_err(|source| FingerprintError::NotFound { path: path.to_path_buf(), source })?;

        let metadata = file
            .metadata()
            .map_err(|source| FingerprintError::NotFound { path: path.to_path_buf(), source })?;
        if metadata.is_dir() {
            return Err(FingerprintError::NotFound {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "path is a directory"),
            });
        }

        let decoder = self.decoder_for(&mut file, path, encoding)?;
        tracing::debug!("Opened {} as {}", path.display(), decoder.encoding().name());
        Ok(DecodedLines::new(file, decoder, path.to_path_buf()))
    }
}

/// Detect the encoding from the first bytes of `file`, then rewind it.
fn sniff(file: &mut File) -> io::Result<&'static Encoding> {
    let mut sample = Vec::with_capacity(DEFAULT_SAMPLE_SIZE);
    file.by_ref().take(DEFAULT_SAMPLE_SIZE as u64).read_to_end(&mut sample)?;
    file.seek(SeekFrom::Start(0))?;
    Ok(detect_encoding(&sample))
}
