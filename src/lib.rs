//! # dawinspect
//!
//! Diagnostics for `.dawproject` files, which are ZIP archives carrying a
//! `project.xml` manifest next to their media.
//!
//! The tool compares a known good and a known bad project by printing, for
//! each of them:
//!
//! - the archive entries with their uncompressed sizes, and the start of the XML
//! - textual `<Audio ...</Audio>` excerpts, or the text around the first `Audio`
//! - the indented element tree below the first `<Arrangement>`
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use dawinspect::{ArchiveReader, Document, render_tree};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let archive = ArchiveReader::open(Path::new("song.dawproject")).await?;
//!     for entry in archive.list_entries().await? {
//!         println!("{} ({} bytes)", entry.name(), entry.size());
//!     }
//!
//!     let text = String::from_utf8(archive.read_entry("project.xml").await?)?;
//!     let document = Document::parse(&text)?;
//!     if let Some(arrangement) = document.find_by_tag_name("Arrangement").first() {
//!         print!("{}", render_tree(arrangement));
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod inspect;
pub mod io;
pub mod logging;
pub mod text;
pub mod xml;
pub mod zip;

pub use crate::cli::Cli;
pub use crate::error::{InspectError, Result};
pub use crate::inspect::{InspectOptions, Pass, inspect_audio, inspect_files, inspect_structure};
pub use crate::io::{LocalFileReader, MemoryReader, ReadAt};
pub use crate::xml::{Document, Element, print_tree, render_tree};
pub use crate::zip::{ArchiveReader, ZipFileEntry};
