//! Incremental decoding of a byte stream into lines.

use encoding_rs::{Decoder, DecoderResult};
use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::error::FingerprintError;

const READ_CHUNK_SIZE: usize = 8192;

/// Lazily decoded, terminator-stripped lines of a byte stream.
///
/// Bytes are pulled from the reader one chunk at a time, so a consumer that
/// stops early never causes the rest of the stream to be read. Decoding is
/// strict, but a read or decode failure is only reported once the consumer
/// asks for a line that reaches past the failing point: every complete line
/// before it is yielded first.
///
/// Lines end at `\n`, `\r` or `\r\n`. A final line without a terminator is
/// still yielded, a trailing terminator does not add an empty line.
pub struct DecodedLines<R> {
    reader: R,
    decoder: Decoder,
    path: PathBuf,
    chunk: Box<[u8]>,
    pending: String,
    error: Option<FingerprintError>,
    eof: bool,
    failed: bool,
}

impl<R: Read> DecodedLines<R> {
    pub fn new(reader: R, decoder: Decoder, path: PathBuf) -> Self {
        Self {
            reader,
            decoder,
            path,
            chunk: vec![0u8; READ_CHUNK_SIZE].into_boxed_slice(),
            pending: String::new(),
            error: None,
            eof: false,
            failed: false,
        }
    }

    /// Decode the next chunk into `pending`. A failure is parked in `error`
    /// after keeping whatever decoded cleanly before it.
    fn fill(&mut self) {
        let read = loop {
            match self.reader.read(&mut self.chunk) {
                Ok(n) => break n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    self.error = Some(FingerprintError::Io { path: self.path.clone(), source });
                    return;
                }
            }
        };

        // A zero-length read flushes any incomplete trailing sequence.
        let last = read == 0;
        let mut src = &self.chunk[..read];
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length_without_replacement(src.len())
                .unwrap_or(src.len().saturating_mul(3));
            self.pending.reserve(needed);

            let (result, consumed) =
                self.decoder.decode_to_string_without_replacement(src, &mut self.pending, last);
            src = &src[consumed..];
            match result {
                DecoderResult::InputEmpty => break,
                DecoderResult::OutputFull => continue,
                DecoderResult::Malformed(_, _) => {
                    self.error = Some(FingerprintError::Malformed {
                        path: self.path.clone(),
                        encoding: self.decoder.encoding().name(),
                    });
                    return;
                }
            }
        }

        self.eof = last;
    }

    /// Split the first complete line off `pending`.
    ///
    /// A `\r` at the very end of `pending` is only a terminator once no more
    /// input can follow; otherwise it may be the first half of `\r\n`.
    fn take_line(&mut self) -> Option<String> {
        let end = self.pending.find(|c: char| c == '\r' || c == '\n')?;
        let input_done = self.eof || self.error.is_some();
        let terminator_len = match self.pending.as_bytes()[end..] {
            [b'\r', b'\n', ..] => 2,
            [b'\r'] if !input_done => return None,
            _ => 1,
        };

        let line = self.pending[..end].to_string();
        self.pending.drain(..end + terminator_len);
        Some(line)
    }
}

impl<R> fmt::Debug for DecodedLines<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedLines")
            .field("path", &self.path)
            .field("encoding", &self.decoder.encoding().name())
            .field("pending", &self.pending.len())
            .field("eof", &self.eof)
            .field("failed", &self.failed)
            .finish()
    }
}

impl<R: Read> Iterator for DecodedLines<R> {
    type Item = Result<String, FingerprintError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }

            if let Some(line) = self.take_line() {
                return Some(Ok(line));
            }

            // Whatever is left in `pending` runs into the failing point.
            if let Some(err) = self.error.take() {
                self.failed = true;
                return Some(Err(err));
            }

            if self.eof {
                if self.pending.is_empty() {
                    return None;
                }
                return Some(Ok(std::mem::take(&mut self.pending)));
            }

            self.fill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_16LE, UTF_8, WINDOWS_1252};
    use std::io::Cursor;

    fn lines_of(bytes: &[u8], decoder: Decoder) -> Vec<Result<String, FingerprintError>> {
        DecodedLines::new(Cursor::new(bytes.to_vec()), decoder, PathBuf::from("test.txt"))
            .collect()
    }

    fn ok_lines(bytes: &[u8], decoder: Decoder) -> Vec<String> {
        lines_of(bytes, decoder).into_iter().map(|line| line.unwrap()).collect()
    }

    #[test]
    fn test_splits_and_strips_terminators() {
        let lines = ok_lines(b"one\ntwo\r\nthree", UTF_8.new_decoder());
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_trailing_newline_adds_no_empty_line() {
        let lines = ok_lines(b"one\ntwo\n", UTF_8.new_decoder());
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_keeps_inner_empty_lines() {
        let lines = ok_lines(b"a\n\n\nb\n", UTF_8.new_decoder());
        assert_eq!(lines, vec!["a", "", "", "b"]);
    }

    #[test]
    fn test_empty_input_has_no_lines() {
        assert!(lines_of(b"", UTF_8.new_decoder()).is_empty());
    }

    #[test]
    fn test_lines_spanning_chunks() {
        let long = "x".repeat(READ_CHUNK_SIZE * 2 + 17);
        let input = format!("{long}\nshort\n");
        let lines = ok_lines(input.as_bytes(), UTF_8.new_decoder());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), long.len());
        assert_eq!(lines[1], "short");
    }

    #[test]
    fn test_multibyte_character_split_across_chunks() {
        let mut input = "a".repeat(READ_CHUNK_SIZE - 1);
        input.push('\u{e9}');
        input.push_str("\nend");
        let lines = ok_lines(input.as_bytes(), UTF_8.new_decoder());
        assert!(lines[0].ends_with('\u{e9}'));
        assert_eq!(lines[1], "end");
    }

    #[test]
    fn test_bom_removed() {
        let lines = ok_lines(b"\xef\xbb\xbfhello\n", UTF_8.new_decoder_with_bom_removal());
        assert_eq!(lines, vec!["hello"]);
    }

    #[test]
    fn test_utf16_input() {
        let bytes: Vec<u8> = "hi\nthere".encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect();
        let lines = ok_lines(&bytes, UTF_16LE.new_decoder_with_bom_removal());
        assert_eq!(lines, vec!["hi", "there"]);
    }

    #[test]
    fn test_single_byte_encoding() {
        let lines = ok_lines(b"caf\xe9\n", WINDOWS_1252.new_decoder_with_bom_removal());
        assert_eq!(lines, vec!["caf\u{e9}"]);
    }

    #[test]
    fn test_malformed_input_fails_then_stops() {
        let results = lines_of(b"fine\nbad \xff byte\nnever\n", UTF_8.new_decoder());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap(), "fine");
        assert!(matches!(
            results[1],
            Err(FingerprintError::Malformed { encoding: "UTF-8", .. })
        ));
    }

    #[test]
    fn test_lines_before_malformed_byte_are_usable() {
        let mut lines = DecodedLines::new(
            Cursor::new(b"one\ntwo\nthree\nbad \xff\n".to_vec()),
            UTF_8.new_decoder(),
            PathBuf::from("test.txt"),
        );
        assert_eq!(lines.next().unwrap().unwrap(), "one");
        assert_eq!(lines.next().unwrap().unwrap(), "two");
        assert_eq!(lines.next().unwrap().unwrap(), "three");
        assert!(matches!(lines.next(), Some(Err(FingerprintError::Malformed { .. }))));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_lone_carriage_returns_end_lines() {
        let lines = ok_lines(b"a\rb\rc\r\nd\n\re\r", UTF_8.new_decoder());
        assert_eq!(lines, vec!["a", "b", "c", "d", "", "e"]);
    }

    #[test]
    fn test_crlf_split_across_chunks() {
        let mut input = "x".repeat(READ_CHUNK_SIZE - 1);
        input.push_str("\r\nnext\n");
        let lines = ok_lines(input.as_bytes(), UTF_8.new_decoder());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), READ_CHUNK_SIZE - 1);
        assert_eq!(lines[1], "next");
    }

    #[test]
    fn test_lone_carriage_return_at_chunk_end() {
        let mut input = "x".repeat(READ_CHUNK_SIZE - 1);
        input.push_str("\rnext");
        let lines = ok_lines(input.as_bytes(), UTF_8.new_decoder());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "next");
    }

    #[test]
    fn test_debug_names_path() {
        let lines =
            DecodedLines::new(Cursor::new(Vec::new()), UTF_8.new_decoder(), PathBuf::from("a.rs"));
        assert!(format!("{lines:?}").contains("a.rs"));
    }

    #[test]
    fn test_truncated_sequence_at_eof_is_malformed() {
        let results = lines_of(b"ok\ncaf\xc3", UTF_8.new_decoder());
        assert!(results.iter().any(|line| matches!(line, Err(FingerprintError::Malformed { .. }))));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn test_read_error_surfaces_as_io() {
        let mut lines =
            DecodedLines::new(FailingReader, UTF_8.new_decoder(), PathBuf::from("locked.rs"));
        assert!(matches!(lines.next(), Some(Err(FingerprintError::Io { .. }))));
        assert!(lines.next().is_none());
    }
}
