use std::io::Read;
use std::path::Path;

use flate2::Crc;
use flate2::read::DeflateDecoder;

use crate::error::{InspectError, Result};
use crate::io::{LocalFileReader, ReadAt};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// Read-only view of a ZIP container.
///
/// Owns its byte source; for a local file the handle is released when the
/// reader is dropped.
pub struct ArchiveReader<R: ReadAt> {
    parser: ZipParser<R>,
    entries: Vec<ZipFileEntry>,
}

impl ArchiveReader<LocalFileReader> {
    /// Open a local archive and read its central directory.
    pub async fn open(path: &Path) -> Result<Self> {
        let reader = LocalFileReader::new(path)?;
        Self::new(reader).await
    }
}

impl<R: ReadAt> ArchiveReader<R> {
    /// Wrap a byte source, failing if it is not a ZIP container.
    pub async fn new(reader: R) -> Result<Self> {
        let parser = ZipParser::new(reader);
        let entries = parser.list_files().await?;
        Ok(Self { parser, entries })
    }

    /// Entries as (name, size) records, in archive order.
    ///
    /// Re-reads the central directory on every call.
    pub async fn list_entries(&self) -> Result<Vec<ZipFileEntry>> {
        self.parser.list_files().await
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    fn entry(&self, name: &str) -> Option<&ZipFileEntry> {
        self.entries.iter().find(|e| e.file_name == name)
    }

    /// Uncompressed bytes of the named entry.
    pub async fn read_entry(&self, name: &str) -> Result<Vec<u8>> {
        let entry = self
            .entry(name)
            .ok_or_else(|| InspectError::EntryNotFound(name.to_string()))?;

        let raw = self.parser.read_raw(entry).await?;
        let data = match entry.compression_method {
            CompressionMethod::Stored => raw,
            CompressionMethod::Deflate => {
                // One byte past the recorded size is enough to detect an overrun
                let mut out = Vec::new();
                DeflateDecoder::new(raw.as_slice())
                    .take(entry.uncompressed_size.saturating_add(1))
                    .read_to_end(&mut out)
                    .map_err(|e| corrupt(entry, format!("inflate failed: {e}")))?;
                out
            }
            CompressionMethod::Unknown(method) => {
                return Err(InspectError::UnsupportedCompression {
                    name: entry.file_name.clone(),
                    method,
                });
            }
        };

        if data.len() as u64 != entry.uncompressed_size {
            return Err(corrupt(
                entry,
                format!(
                    "expected {} bytes, got {}",
                    entry.uncompressed_size,
                    data.len()
                ),
            ));
        }

        let mut crc = Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            return Err(corrupt(
                entry,
                format!("CRC-32 {:08x} does not match {:08x}", crc.sum(), entry.crc32),
            ));
        }

        tracing::debug!(
            "read {} ({} bytes, method {})",
            entry.file_name,
            data.len(),
            entry.compression_method.as_u16()
        );
        Ok(data)
    }
}

fn corrupt(entry: &ZipFileEntry, reason: String) -> InspectError {
    InspectError::CorruptEntry {
        name: entry.file_name.clone(),
        reason,
    }
}
