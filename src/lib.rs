//! # punzip
//!
//! A Rust unzip utility with support for password-protected archives.
//!
//! This library extracts ZIP archives from the local filesystem,
//! including archives encrypted with traditional PKWARE encryption
//! (ZipCrypto). Extraction returns an ordered manifest of the
//! archive's entries, preserving the central directory's stored
//! order, so callers can assert on entry positions.
//!
//! ## Features
//!
//! - Extract ZIP files, with or without a password
//! - Support for ZIP64 format (archives larger than 4GB)
//! - Support for STORED (uncompressed) and DEFLATE compression methods
//! - Ordered per-call manifest of entry metadata
//! - CRC-32 verification of extracted data
//!
//! ## Example
//!
//! ```no_run
//! use punzip::{ExtractionRequest, extract};
//!
//! fn main() -> Result<(), punzip::ArchiveError> {
//!     let request = ExtractionRequest::new("archive.zip", "out")
//!         .with_password("153456");
//!
//!     let manifest = extract(request)?;
//!     for entry in &manifest {
//!         println!("{}", entry.file_name);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod io;
pub mod zip;

pub use cli::Cli;
pub use error::ArchiveError;
pub use io::{LocalFileReader, ReadAt};
pub use zip::{ArchiveEntry, ExtractionRequest, ExtractionResult, ZipExtractor, extract};
