//! ZIP container reading.
//!
//! A `.dawproject` file is a plain ZIP archive, so only the read side of the
//! format is needed here:
//!
//! - [`structures`]: ZIP format records (EOCD, ZIP64 records, entries)
//! - [`parser`]: low-level parsing of those records from a [`ReadAt`](crate::io::ReadAt) source
//! - [`reader`]: [`ArchiveReader`], listing entries and reading one entry's bytes
//!
//! The EOCD is read first (from the end of the file), then the Central
//! Directory, so listing never touches entry data.
//!
//! ## Supported Features
//!
//! - ZIP64 extensions
//! - STORED and DEFLATE entries, CRC-32 verified on read
//!
//! No encryption and no multi-disk archives.

mod parser;
mod reader;
mod structures;

pub use parser::ZipParser;
pub use reader::ArchiveReader;
pub use structures::*;
