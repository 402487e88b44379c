//! Error types for the resumetex library.
//!
//! Two error types reflect two failure scopes:
//!
//! * [`ResumeError`]: **fatal**, the run cannot proceed (missing template,
//!   missing data file, unreadable document, output not writable). Returned
//!   as `Err(ResumeError)` from the top-level functions in [`crate::convert`].
//!
//! * [`ExtractionError`]: the word-processing container could not be read
//!   or parsed. Surfaces wrapped in [`ResumeError::Extraction`].
//!
//! Malformed lines in a data file are *not* errors: the parser drops or
//! defaults them. A failed backup of an existing output file is not an error
//! either; it is reported through [`crate::pipeline::template::BackupOutcome`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the resumetex library.
#[derive(Debug, Error)]
pub enum ResumeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Template file was not found, including after the legacy-name fallback.
    #[error("Template not found: '{path}'")]
    TemplateNotFound { path: PathBuf },

    /// Structured data file was not found.
    #[error("Data file not found: '{path}'")]
    DataNotFound { path: PathBuf },

    /// Input document (docx or extracted text) was not found.
    #[error("Document not found: '{path}'\nCheck the path exists and is readable.")]
    DocumentNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but could not be read as UTF-8 text.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document container could not be read.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failure to read text out of a word-processing container.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The file is not a zip container (wrong magic bytes).
    #[error("File is not a word-processing document: '{path}'\nFirst bytes: {magic:?}")]
    NotAContainer { path: PathBuf, magic: [u8; 4] },

    /// The zip archive is corrupt or truncated.
    #[error("Document '{path}' is corrupt: {detail}")]
    Archive { path: PathBuf, detail: String },

    /// The archive is a zip but has no main document part.
    #[error("Document '{path}' has no '{part}' part")]
    MissingPart { path: PathBuf, part: String },

    /// A document part is not well-formed XML.
    #[error("Malformed XML in '{part}' at byte {position}: {detail}")]
    Xml {
        part: String,
        position: usize,
        detail: String,
    },
}
