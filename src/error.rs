//! Error types for archive extraction.

use thiserror::Error;

/// Errors that can occur while reading or extracting an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Filesystem read/write failure on the source or destination
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid ZIP archive, or a structure inside it
    /// is malformed
    #[error("invalid ZIP archive: {0}")]
    Format(String),

    /// The archive is encrypted and the password is missing or wrong
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Entry uses a compression method this crate does not handle
    #[error("unsupported compression method: {0}")]
    UnsupportedCompression(u16),

    /// Decompressed data did not match the CRC-32 recorded in the
    /// entry header
    #[error("CRC mismatch for '{name}': expected {expected:08x}, got {actual:08x}")]
    Crc {
        /// Entry name as stored in the archive
        name: String,
        /// CRC-32 from the central directory header
        expected: u32,
        /// CRC-32 of the extracted bytes
        actual: u32,
    },
}

impl ArchiveError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        ArchiveError::Format(msg.into())
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, ArchiveError>;
