//! context-hash: stable fingerprints for source-code warnings
//!
//! A warning is fingerprinted by hashing the source lines around it rather
//! than its line number, so the same warning can be recognized after unrelated
//! edits shift it up or down in the file.

pub mod batch;
pub mod config;
pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod source;
pub mod utils;

pub use domain::{Config, Fingerprint, LineBase};
pub use error::{ErrorKind, FingerprintError};
pub use fingerprint::{compute_fingerprint, ContextHasher, DEFAULT_LOOKAHEAD};
pub use source::{FileLineSource, LineSource};
