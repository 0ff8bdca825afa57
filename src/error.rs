//! Errors raised by the TAP core.

use std::path::PathBuf;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, scanning or writing TAP files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File isn't a valid TAP: missing C64-TAPE-RAW signature")]
    InvalidSignature,

    #[error("File isn't a valid TAP: {len} bytes is shorter than the 20-byte header")]
    TruncatedHeader { len: usize },

    #[error("TAP payload of {len} bytes does not fit the 32-bit size field")]
    PayloadTooLarge { len: usize },

    #[error("There are no blocks to split ({found} found)")]
    InsufficientSegments { found: usize },

    #[error("Block {index} cannot be joined: only {count} blocks available")]
    SegmentOutOfRange { index: usize, count: usize },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read TAP file: {0}")]
    Io(#[from] std::io::Error),
}
