//! Encoding label resolution and detection.
//!
//! Detection order:
//! - BOM markers (UTF-8, UTF-16 LE/BE)
//! - strict UTF-8 validation of the sample
//! - chardetng for everything else

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

use crate::error::FingerprintError;

/// Number of leading bytes inspected when detecting an encoding.
pub const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Resolve a WHATWG encoding label such as `"utf-8"`, `"latin1"` or
/// `"windows-1252"`.
pub fn resolve_encoding_label(label: &str) -> Result<&'static Encoding, FingerprintError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| FingerprintError::UnsupportedEncoding { label: label.to_string() })
}

/// Guess the encoding of a leading byte sample.
///
/// An empty sample is reported as UTF-8.
pub fn detect_encoding(sample: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(sample) {
        return encoding;
    }

    // A multi-byte sequence cut off by the end of the sample still counts as UTF-8
    match std::str::from_utf8(sample) {
        Ok(_) => return UTF_8,
        Err(err) if err.error_len().is_none() => return UTF_8,
        Err(_) => {}
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    detector.guess(None, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_16BE, UTF_16LE, WINDOWS_1252};

    #[test]
    fn test_detect_utf8() {
        assert_eq!(detect_encoding("Hello, world!".as_bytes()), UTF_8);
        assert_eq!(detect_encoding(b""), UTF_8);
    }

    #[test]
    fn test_detect_truncated_utf8_sample() {
        let bytes = "caf\u{e9}".as_bytes();
        assert_eq!(detect_encoding(&bytes[..bytes.len() - 1]), UTF_8);
    }

    #[test]
    fn test_detect_boms() {
        assert_eq!(detect_encoding(&[0xef, 0xbb, 0xbf, b'h', b'i']), UTF_8);
        assert_eq!(detect_encoding(&[0xff, 0xfe, b'h', 0x00]), UTF_16LE);
        assert_eq!(detect_encoding(&[0xfe, 0xff, 0x00, b'h']), UTF_16BE);
    }

    #[test]
    fn test_detect_legacy_single_byte() {
        let sample = b"// Gr\xfc\xdfe aus M\xfcnchen, sch\xf6ne Gr\xfc\xdfe an alle\n";
        let encoding = detect_encoding(sample);
        assert_ne!(encoding, UTF_8);
        let (text, _, had_errors) = encoding.decode(sample);
        assert!(!had_errors);
        assert!(text.contains("M\u{fc}nchen"));
    }

    #[test]
    fn test_resolve_labels() {
        assert_eq!(resolve_encoding_label("UTF-8").unwrap(), UTF_8);
        assert_eq!(resolve_encoding_label(" latin1 ").unwrap(), WINDOWS_1252);
        assert_eq!(resolve_encoding_label("utf-16").unwrap(), UTF_16LE);
    }

    #[test]
    fn test_resolve_unknown_label() {
        let err = resolve_encoding_label("klingon").unwrap_err();
        assert!(matches!(err, FingerprintError::UnsupportedEncoding { ref label } if label == "klingon"));
    }
}
