//! Shared helpers for encoding resolution and context hashing.

pub mod encoding;
pub mod hashing;

pub use encoding::{detect_encoding, resolve_encoding_label, DEFAULT_SAMPLE_SIZE};
pub use hashing::java_string_hash;
