//! Top-level operations: each composes pipeline stages from file to file.
//!
//! These are the entry points the CLI calls. All of them are synchronous
//! and read their inputs whole.

use crate::config::{CleanConfig, ExtractConfig, RenderConfig};
use crate::error::ResumeError;
use crate::pipeline::blocks::placeholder_map;
use crate::pipeline::input::{self, InputKind};
use crate::pipeline::template::{self, BackupOutcome};
use crate::pipeline::{clean, extract, parse};
use crate::resume::ResumeData;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of a successful [`render`].
#[derive(Debug)]
pub struct RenderReport {
    /// Template actually used (may be the legacy name).
    pub template: PathBuf,
    pub output: PathBuf,
    pub backup: BackupOutcome,
    /// `{{TOKEN}}` names still present in the output, in order of appearance.
    pub unresolved: Vec<String>,
}

/// Extract plain text from a docx file.
pub fn extract_document(
    input: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<String, ResumeError> {
    extract::extract_text(input.as_ref(), config)
}

/// Extract a docx file's text and write it to `output`.
pub fn extract_to_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<String, ResumeError> {
    let text = extract_document(input, config)?;
    template::write_atomic(output.as_ref(), &text)?;
    info!("Wrote extracted text to {}", output.as_ref().display());
    Ok(text)
}

/// Read a text file and return its cleaned contents.
pub fn clean_document(
    input: impl AsRef<Path>,
    config: &CleanConfig,
) -> Result<String, ResumeError> {
    let raw = input::read_text(input.as_ref(), InputKind::Document)?;
    let cleaned = clean::clean_text(&raw, config);
    debug!(
        "Cleaned {} lines down to {}",
        raw.lines().count(),
        cleaned.lines().count()
    );
    Ok(cleaned)
}

/// Clean a text file and write the result to `output`.
pub fn clean_to_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &CleanConfig,
) -> Result<String, ResumeError> {
    let cleaned = clean_document(input, config)?;
    template::write_atomic(output.as_ref(), &cleaned)?;
    info!("Wrote cleaned text to {}", output.as_ref().display());
    Ok(cleaned)
}

/// Parse a data file without rendering anything.
pub fn inspect(data: impl AsRef<Path>) -> Result<ResumeData, ResumeError> {
    let text = input::read_text(data.as_ref(), InputKind::Data)?;
    Ok(parse::parse_data(&text))
}

/// Render template text with data-file text. No I/O.
pub fn render_text(template_text: &str, data_text: &str) -> String {
    let data = parse::parse_data(data_text);
    let map = placeholder_map(&data);
    template::apply_template(template_text, &map)
}

/// Render the data file into the template and write the output file.
///
/// A pre-existing output is renamed to a timestamped backup first; if that
/// rename fails the run continues and the file is overwritten.
pub fn render(config: &RenderConfig) -> Result<RenderReport, ResumeError> {
    let template_path = input::resolve_template(&config.template)?;
    let data_path = input::resolve_local(&config.data, InputKind::Data)?;

    let data_text = input::read_text(&data_path, InputKind::Data)?;
    let template_text = input::read_text(&template_path, InputKind::Template)?;

    let rendered = render_text(&template_text, &data_text);
    let unresolved = unresolved_placeholders(&rendered);
    if !unresolved.is_empty() {
        warn!("Unresolved placeholders left in output: {:?}", unresolved);
    }

    let backup = if config.backup_existing {
        template::backup_existing(&config.output)
    } else {
        BackupOutcome::NotNeeded
    };

    template::write_atomic(&config.output, &rendered)?;
    info!("Generated LaTeX resume: {}", config.output.display());

    Ok(RenderReport {
        template: template_path,
        output: config.output.clone(),
        backup,
        unresolved,
    })
}

static RE_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{([A-Z0-9_]+)\}\}").unwrap());

/// Names of `{{TOKEN}}` placeholders remaining in `text`, deduplicated.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in RE_PLACEHOLDER.captures_iter(text) {
        let name = caps[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
