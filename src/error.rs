//! Error types shared by the archive, text and XML layers.

use std::path::PathBuf;

use thiserror::Error;

/// Library result type alias
pub type Result<T> = std::result::Result<T, InspectError>;

/// Everything that can go wrong while inspecting a `.dawproject` archive.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The archive file could not be opened
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The data is not a readable ZIP container
    #[error("not a valid ZIP archive: {0}")]
    InvalidArchive(String),

    /// Read failure on an already opened source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No entry with the requested name
    #[error("{0} NOT FOUND")]
    EntryNotFound(String),

    #[error("unsupported compression method {method} for {name}")]
    UnsupportedCompression { name: String, method: u16 },

    /// Entry data does not match its central directory record
    #[error("corrupt entry {name}: {reason}")]
    CorruptEntry { name: String, reason: String },

    /// Entry bytes are not valid UTF-8
    #[error("cannot decode {name} as UTF-8: {source}")]
    Decode {
        name: String,
        source: std::string::FromUtf8Error,
    },

    #[error("malformed XML at byte {position}: {message}")]
    MalformedXml { position: usize, message: String },

    #[error("term {0:?} not found")]
    TermNotFound(String),

    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl InspectError {
    pub(crate) fn invalid_archive(msg: impl Into<String>) -> Self {
        Self::InvalidArchive(msg.into())
    }

    pub(crate) fn malformed(position: usize, message: impl ToString) -> Self {
        Self::MalformedXml {
            position,
            message: message.to_string(),
        }
    }
}
