use std::fs;
use std::io::Read;
use std::ops::Index;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use flate2::Crc;
use flate2::read::DeflateDecoder;
use log::warn;

use crate::error::{ArchiveError, Result};
use crate::io::{LocalFileReader, ReadAt};

use super::crypto::ZipCrypto;
use super::parser::ZipParser;
use super::structures::{ArchiveEntry, CompressionMethod, ENCRYPTION_HEADER_SIZE};

/// Cap on the buffer reserved up front from the untrusted
/// uncompressed-size header field; the vector still grows as needed.
const MAX_PREALLOC: u64 = 1 << 20;

/// One extraction job: source archive, destination directory, and an
/// optional password for encrypted archives.
///
/// Constructed by the caller and consumed by [`extract`]. The
/// destination directory is created if absent and never removed; the
/// caller owns cleanup, including after a failed extraction.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub password: Option<String>,
}

impl ExtractionRequest {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            password: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// The manifest produced by one extraction: every entry of the
/// archive, in the exact order the central directory stores them.
///
/// Positional indexing is part of the contract; `result[0]` is the
/// first entry the archive stores.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    entries: Vec<ArchiveEntry>,
}

impl ExtractionResult {
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArchiveEntry> {
        self.entries.iter()
    }
}

impl Index<usize> for ExtractionResult {
    type Output = ArchiveEntry;

    fn index(&self, index: usize) -> &ArchiveEntry {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a ExtractionResult {
    type Item = &'a ArchiveEntry;
    type IntoIter = std::slice::Iter<'a, ArchiveEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Extract an archive and return its manifest.
///
/// Opens the archive at `request.source`, creates
/// `request.destination` if needed, extracts every entry beneath it
/// preserving the archive's relative structure, and returns the
/// ordered manifest.
///
/// If the archive contains encrypted entries, the password is applied;
/// a missing or wrong password yields
/// [`ArchiveError::Authentication`]. A password supplied for an
/// unencrypted archive is ignored.
///
/// # Errors
///
/// [`ArchiveError::Format`] for files that are not valid ZIP archives,
/// [`ArchiveError::Authentication`] for password failures,
/// [`ArchiveError::Io`] when the source cannot be read or the
/// destination cannot be written. Output already written before a
/// failure is left on disk for the caller to clean up.
pub fn extract(request: ExtractionRequest) -> Result<ExtractionResult> {
    let reader = Arc::new(LocalFileReader::new(&request.source)?);
    let extractor = ZipExtractor::new(reader);
    extractor.extract_all(&request.destination, request.password.as_deref())
}

/// ZIP file extractor
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
}

impl<R: ReadAt> ZipExtractor<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all entries in the archive, in stored order
    pub fn list_entries(&self) -> Result<Vec<ArchiveEntry>> {
        self.parser.list_entries()
    }

    /// Extract every entry into `destination` and return the manifest.
    ///
    /// The destination directory is created if it does not exist.
    /// Encryption is checked up front so that a missing password fails
    /// before anything is written.
    pub fn extract_all(
        &self,
        destination: &Path,
        password: Option<&str>,
    ) -> Result<ExtractionResult> {
        let entries = self.list_entries()?;

        if entries.iter().any(ArchiveEntry::is_encrypted) && password.is_none() {
            return Err(ArchiveError::Authentication(
                "archive is encrypted and no password was supplied".into(),
            ));
        }

        fs::create_dir_all(destination)?;

        for entry in &entries {
            let Some(relative) = sanitize_path(&entry.file_name) else {
                warn!("skipping entry with unsafe path: {}", entry.file_name);
                continue;
            };
            let target = destination.join(relative);

            if entry.is_directory {
                fs::create_dir_all(&target)?;
                continue;
            }

            let data = self.read_entry(entry, password)?;

            if let Some(parent) = target.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &data)?;
        }

        Ok(ExtractionResult { entries })
    }

    /// Read and decompress one entry into memory.
    ///
    /// Handles decryption when the entry is encrypted, inflates
    /// DEFLATE data, and verifies the CRC-32 recorded in the central
    /// directory. Directory entries yield an empty buffer.
    pub fn read_entry(&self, entry: &ArchiveEntry, password: Option<&str>) -> Result<Vec<u8>> {
        if entry.is_directory {
            return Ok(Vec::new());
        }

        // AES-encrypted entries carry method 99; refuse them before
        // attempting ZipCrypto so the error names the real problem.
        if let CompressionMethod::Unknown(method) = entry.compression_method {
            return Err(ArchiveError::UnsupportedCompression(method));
        }

        let data_offset = self.parser.data_offset(entry)?;

        // Header sizes are untrusted; a forged ZIP64 extra can claim
        // sizes far beyond the file. Check the data range against the
        // archive before allocating anything from it.
        if data_offset
            .checked_add(entry.compressed_size)
            .is_none_or(|end| end > self.parser.reader().size())
        {
            return Err(ArchiveError::format("entry data out of bounds"));
        }

        let mut raw = vec![0u8; entry.compressed_size as usize];
        self.parser.reader().read_exact_at(data_offset, &mut raw)?;

        // For encrypted entries the stored data starts with a 12-byte
        // encryption header and the compressed size includes it.
        let compressed = if entry.is_encrypted() {
            let Some(password) = password else {
                return Err(ArchiveError::Authentication(
                    "entry is encrypted and no password was supplied".into(),
                ));
            };
            if raw.len() < ENCRYPTION_HEADER_SIZE {
                return Err(ArchiveError::format("encrypted entry data too short"));
            }

            let mut cipher = ZipCrypto::new(password.as_bytes());
            let (header, body) = raw.split_at_mut(ENCRYPTION_HEADER_SIZE);
            cipher.decrypt(header);
            if header[ENCRYPTION_HEADER_SIZE - 1] != entry.password_check_byte() {
                return Err(ArchiveError::Authentication("wrong password".into()));
            }
            cipher.decrypt(body);
            &raw[ENCRYPTION_HEADER_SIZE..]
        } else {
            &raw[..]
        };

        let data = match entry.compression_method {
            CompressionMethod::Stored => compressed.to_vec(),
            CompressionMethod::Deflate => {
                let mut decoder = DeflateDecoder::new(compressed);
                let mut data =
                    Vec::with_capacity(entry.uncompressed_size.min(MAX_PREALLOC) as usize);
                decoder
                    .read_to_end(&mut data)
                    .map_err(|e| ArchiveError::format(format!("inflate failed: {e}")))?;
                data
            }
            CompressionMethod::Unknown(method) => {
                return Err(ArchiveError::UnsupportedCompression(method));
            }
        };

        let mut crc = Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            // The 1-in-256 check byte can pass with a wrong password;
            // the CRC over the full data catches the rest.
            if entry.is_encrypted() {
                return Err(ArchiveError::Authentication("wrong password".into()));
            }
            return Err(ArchiveError::Crc {
                name: entry.file_name.clone(),
                expected: entry.crc32,
                actual: crc.sum(),
            });
        }

        Ok(data)
    }

    /// Extract a single entry to the given path on disk
    pub fn extract_to_file(
        &self,
        entry: &ArchiveEntry,
        password: Option<&str>,
        output_path: &Path,
    ) -> Result<()> {
        if let Some(parent) = output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let data = self.read_entry(entry, password)?;
        fs::write(output_path, &data)?;

        Ok(())
    }
}

/// Strip path components that would escape the destination directory.
///
/// Keeps only normal components, dropping `..`, `.`, root and drive
/// prefixes. Returns None when nothing safe remains.
fn sanitize_path(name: &str) -> Option<PathBuf> {
    let mut sanitized = PathBuf::new();

    for component in Path::new(name).components() {
        if let Component::Normal(part) = component {
            sanitized.push(part);
        }
    }

    if sanitized.as_os_str().is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_path;
    use std::path::PathBuf;

    #[test]
    fn sanitize_keeps_relative_paths() {
        assert_eq!(
            sanitize_path("dir/file.txt"),
            Some(PathBuf::from("dir/file.txt"))
        );
    }

    #[test]
    fn sanitize_strips_traversal_components() {
        assert_eq!(
            sanitize_path("../../etc/passwd"),
            Some(PathBuf::from("etc/passwd"))
        );
        assert_eq!(sanitize_path("/abs/path"), Some(PathBuf::from("abs/path")));
        assert_eq!(sanitize_path(".."), None);
        assert_eq!(sanitize_path(""), None);
    }
}
