//! The three diagnostic passes over one `.dawproject` archive.
//!
//! Every pass runs inside a single error scope: whatever goes wrong while
//! opening, reading, decoding or parsing is printed as one `Error: ...` line
//! and the pass returns normally. Only failures of the output sink itself are
//! returned to the caller.

use std::io::{self, Write};
use std::path::Path;

use crate::error::{InspectError, Result};
use crate::text::{bounded_matches, context_window, decode_utf8, preview, tag_markers};
use crate::xml::{Document, print_tree};
use crate::zip::ArchiveReader;

/// Knobs shared by all passes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectOptions {
    /// Archive entry holding the project XML
    pub entry: String,
    /// Characters of the entry shown by the listing pass
    pub preview_chars: usize,
    /// Tag searched textually by the audio pass
    pub tag: String,
    /// Maximum number of matches printed by the audio pass
    pub limit: usize,
    /// Element whose subtree the structure pass prints
    pub element: String,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            entry: "project.xml".to_string(),
            preview_chars: 2000,
            tag: "Audio".to_string(),
            limit: 3,
            element: "Arrangement".to_string(),
        }
    }
}

/// One diagnostic pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Files,
    Audio,
    Structure,
}

impl Pass {
    pub async fn run<W: Write>(
        self,
        out: &mut W,
        label: &str,
        path: &Path,
        opts: &InspectOptions,
    ) -> io::Result<()> {
        match self {
            Pass::Files => inspect_files(out, label, path, opts).await,
            Pass::Audio => inspect_audio(out, label, path, opts).await,
            Pass::Structure => inspect_structure(out, label, path, opts).await,
        }
    }
}

/// List archive entries and show the start of the project XML.
pub async fn inspect_files<W: Write>(
    out: &mut W,
    label: &str,
    path: &Path,
    opts: &InspectOptions,
) -> io::Result<()> {
    writeln!(out, "--- Inspecting {label} ({}) ---", path.display())?;
    let mut body = Vec::new();
    let outcome = list_and_preview(&mut body, path, opts).await;
    finish(out, &body, outcome)?;
    writeln!(out, "\n")?;
    out.flush()
}

/// Show textual `<tag ...</tag>` excerpts, or the text around the tag name.
pub async fn inspect_audio<W: Write>(
    out: &mut W,
    label: &str,
    path: &Path,
    opts: &InspectOptions,
) -> io::Result<()> {
    writeln!(out, "--- Inspecting {label} ({}) ---", path.display())?;
    let mut body = Vec::new();
    let outcome = search_tags(&mut body, path, opts).await;
    finish(out, &body, outcome)?;
    writeln!(out, "\n")?;
    out.flush()
}

/// Print the element tree below the first matching element.
pub async fn inspect_structure<W: Write>(
    out: &mut W,
    label: &str,
    path: &Path,
    opts: &InspectOptions,
) -> io::Result<()> {
    writeln!(out, "\n--- Structure of {label} ({}) ---", path.display())?;
    let mut body = Vec::new();
    let outcome = show_structure(&mut body, path, opts).await;
    finish(out, &body, outcome)?;
    out.flush()
}

/// Copy what the pass produced, then its error line if it failed.
fn finish<W: Write>(out: &mut W, body: &[u8], outcome: Result<()>) -> io::Result<()> {
    out.write_all(body)?;
    if let Err(e) = outcome {
        tracing::warn!("inspection failed: {e}");
        writeln!(out, "Error: {e}")?;
    }
    Ok(())
}

/// Read and decode the project entry, or `None` after reporting it missing.
async fn project_text(
    buf: &mut Vec<u8>,
    path: &Path,
    opts: &InspectOptions,
) -> Result<Option<String>> {
    let archive = ArchiveReader::open(path).await?;
    if !archive.contains(&opts.entry) {
        writeln!(buf, "{} NOT FOUND", opts.entry)?;
        return Ok(None);
    }
    let bytes = archive.read_entry(&opts.entry).await?;
    decode_utf8(&opts.entry, bytes).map(Some)
}

async fn list_and_preview(buf: &mut Vec<u8>, path: &Path, opts: &InspectOptions) -> Result<()> {
    let archive = ArchiveReader::open(path).await?;

    writeln!(buf, "Files in archive:")?;
    for entry in archive.list_entries().await? {
        writeln!(buf, "  {} ({} bytes)", entry.name(), entry.size())?;
    }

    if !archive.contains(&opts.entry) {
        writeln!(buf, "\n{} NOT FOUND", opts.entry)?;
        return Ok(());
    }

    writeln!(
        buf,
        "\nContent of {} (first {} chars):",
        opts.entry, opts.preview_chars
    )?;
    let text = decode_utf8(&opts.entry, archive.read_entry(&opts.entry).await?)?;
    writeln!(buf, "{}", preview(&text, opts.preview_chars))?;
    Ok(())
}

async fn search_tags(buf: &mut Vec<u8>, path: &Path, opts: &InspectOptions) -> Result<()> {
    let Some(text) = project_text(buf, path, opts).await? else {
        return Ok(());
    };

    let (start, end) = tag_markers(&opts.tag);
    let found = bounded_matches(&text, &start, &end)?;
    if !found.is_empty() {
        writeln!(buf, "Found {} {} tags:", found.len(), opts.tag)?;
        for span in found.iter().take(opts.limit) {
            writeln!(buf, "{span}")?;
        }
        return Ok(());
    }

    writeln!(buf, "No <{}> tags found via regex.", opts.tag)?;
    match context_window(&text, &opts.tag) {
        Ok(window) => writeln!(buf, "Context around '{}':\n{window}", opts.tag)?,
        Err(InspectError::TermNotFound(term)) => {
            tracing::debug!("{term:?} does not occur in {}", opts.entry)
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

async fn show_structure(buf: &mut Vec<u8>, path: &Path, opts: &InspectOptions) -> Result<()> {
    let Some(text) = project_text(buf, path, opts).await? else {
        return Ok(());
    };

    let document = Document::parse(&text)?;
    match document.find_by_tag_name(&opts.element).first() {
        Some(node) => {
            writeln!(buf, "Found {}, showing structure...", opts.element)?;
            print_tree(node, buf)?;
        }
        None => writeln!(buf, "{} not found.", opts.element)?,
    }
    Ok(())
}
