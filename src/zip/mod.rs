//! ZIP archive parsing and extraction.
//!
//! This module provides functionality for reading and extracting ZIP archives,
//! supporting standard ZIP, ZIP64 extensions, and password-protected entries.
//!
//! ## Architecture
//!
//! The module is organized into four components:
//!
//! - [`structures`]: Data structures representing ZIP format elements (EOCD, file headers, etc.)
//! - [`parser`]: Low-level parsing of ZIP structures from raw bytes
//! - [`crypto`]: Traditional PKWARE (ZipCrypto) decryption
//! - [`extractor`]: High-level extraction API for end users
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! This implementation reads the EOCD first (from the end of the file),
//! then the Central Directory. The manifest it produces keeps the
//! central directory's stored order, so entry positions are stable
//! across repeated extractions of the same archive.
//!
//! ## Supported Features
//!
//! - Standard ZIP format (PKZIP APPNOTE 6.3.x compatible)
//! - ZIP64 extensions for files > 4GB
//! - STORED (no compression) method
//! - DEFLATE compression method
//! - Traditional PKWARE encryption (ZipCrypto)
//!
//! ## Limitations
//!
//! - No AES encryption support
//! - No multi-disk archive support
//! - No BZIP2, LZMA, or other compression methods

pub mod crypto;
mod extractor;
mod parser;
mod structures;

pub use extractor::{ExtractionRequest, ExtractionResult, ZipExtractor, extract};
pub use parser::ZipParser;
pub use structures::*;
