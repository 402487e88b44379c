//! Input resolution: validate user-supplied paths before any stage runs.
//!
//! Each stage reads its whole input up front. Checking existence and
//! permissions here turns a missing file into a typed, descriptive
//! [`ResumeError`] instead of a bare `io::Error` from deep inside a stage.

use crate::config::legacy_template_for;
use crate::error::{ExtractionError, ResumeError};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Zip local-file-header magic. Every docx starts with it.
const ZIP_MAGIC: [u8; 4] = *b"PK\x03\x04";

/// Which input a path is for; selects the not-found error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Template,
    Data,
    Document,
}

impl InputKind {
    fn not_found(self, path: PathBuf) -> ResumeError {
        match self {
            InputKind::Template => ResumeError::TemplateNotFound { path },
            InputKind::Data => ResumeError::DataNotFound { path },
            InputKind::Document => ResumeError::DocumentNotFound { path },
        }
    }
}

/// Check that `path` exists and is readable.
pub fn resolve_local(path: &Path, kind: InputKind) -> Result<PathBuf, ResumeError> {
    if !path.is_file() {
        return Err(kind.not_found(path.to_path_buf()));
    }
    match File::open(path) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(ResumeError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => return Err(kind.not_found(path.to_path_buf())),
    }
    debug!("Resolved {:?} input: {}", kind, path.display());
    Ok(path.to_path_buf())
}

/// Resolve the template path, falling back to the legacy file name.
///
/// The legacy path is tried only when the configured one is missing; if
/// neither exists the error names the configured path.
pub fn resolve_template(path: &Path) -> Result<PathBuf, ResumeError> {
    if path.is_file() {
        return resolve_local(path, InputKind::Template);
    }
    if let Some(legacy) = legacy_template_for(path) {
        if legacy.is_file() {
            debug!(
                "Template {} missing, using legacy {}",
                path.display(),
                legacy.display()
            );
            return resolve_local(&legacy, InputKind::Template);
        }
    }
    Err(ResumeError::TemplateNotFound {
        path: path.to_path_buf(),
    })
}

/// Resolve a word-processing document, verifying the zip magic bytes.
pub fn resolve_document(path: &Path) -> Result<PathBuf, ResumeError> {
    let path = resolve_local(path, InputKind::Document)?;
    let mut magic = [0u8; 4];
    let mut f = File::open(&path).map_err(|source| ResumeError::ReadFailed {
        path: path.clone(),
        source,
    })?;
    // A file shorter than four bytes can't be a container either.
    let n = f.read(&mut magic).map_err(|source| ResumeError::ReadFailed {
        path: path.clone(),
        source,
    })?;
    if n < 4 || magic != ZIP_MAGIC {
        return Err(ExtractionError::NotAContainer { path, magic }.into());
    }
    Ok(path)
}

/// Read a whole UTF-8 text file.
pub fn read_text(path: &Path, kind: InputKind) -> Result<String, ResumeError> {
    let path = resolve_local(path, kind)?;
    std::fs::read_to_string(&path).map_err(|source| ResumeError::ReadFailed { path, source })
}
