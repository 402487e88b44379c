//! Template application and output backup.
//!
//! Placeholders are literal `{{NAME}}` tokens replaced by plain string
//! substitution, never a regex: `{` and `}` are LaTeX's grouping characters
//! and appear everywhere in a template, so pattern syntax would misfire.
//! Tokens with no entry in the map are left in the output untouched.

use crate::error::ResumeError;
use crate::pipeline::blocks::FragmentMap;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What happened to a pre-existing output file.
#[derive(Debug)]
pub enum BackupOutcome {
    /// No file existed at the destination, or backups are disabled.
    NotNeeded,
    /// The old file was renamed to `path`.
    BackedUp { path: PathBuf },
    /// The rename failed; the old file will be overwritten.
    Failed { error: std::io::Error },
}

/// The `{{KEY}}` token for a fragment name.
pub fn placeholder(key: &str) -> String {
    format!("{{{{{key}}}}}")
}

/// Replace every `{{KEY}}` for each key of `map`, in map order.
pub fn apply_template(template: &str, map: &FragmentMap) -> String {
    let mut out = template.to_string();
    for (key, value) in map.iter() {
        let token = placeholder(key);
        if out.contains(&token) {
            out = out.replace(&token, value);
        } else {
            debug!("Placeholder {} not present in template", token);
        }
    }
    out
}

/// `<output>.bak_<YYYYMMDDHHMMSS>` for the given instant (UTC).
pub fn backup_path_for(output: &Path, at: DateTime<Utc>) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(format!(".bak_{}", at.format("%Y%m%d%H%M%S")));
    PathBuf::from(name)
}

/// Move an existing `output` out of the way. Never fails the run.
pub fn backup_existing(output: &Path) -> BackupOutcome {
    if !output.exists() {
        return BackupOutcome::NotNeeded;
    }
    let backup = backup_path_for(output, Utc::now());
    match std::fs::rename(output, &backup) {
        Ok(()) => {
            info!(
                "Backed up existing {} -> {}",
                output.display(),
                backup.display()
            );
            BackupOutcome::BackedUp { path: backup }
        }
        Err(error) => {
            warn!(
                "Could not back up existing output file {}: {}",
                output.display(),
                error
            );
            BackupOutcome::Failed { error }
        }
    }
}

/// Write `contents` to `path` via a temporary sibling and a rename.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), ResumeError> {
    let write_err = |source: std::io::Error| ResumeError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let tmp = temp_sibling(path);
    std::fs::write(&tmp, contents).map_err(write_err)?;
    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        write_err(e)
    })?;
    Ok(())
}

/// `<path>.tmp`, next to `path` so the rename stays on one filesystem.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
