//! Configuration types for the extract, clean and render stages.
//!
//! Rendering is driven by [`RenderConfig`], built via its
//! [`RenderConfigBuilder`]. Extraction and cleaning each take a small config
//! struct with defaults matching the conventional file layout.

use crate::error::ResumeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Conventional template file name.
pub const DEFAULT_TEMPLATE: &str = "cv.tex.template";

/// Older template file name, tried when [`DEFAULT_TEMPLATE`] is absent.
pub const LEGACY_TEMPLATE: &str = "cv.template.tex";

/// Conventional output file name.
pub const DEFAULT_OUTPUT: &str = "cv.tex";

/// Configuration for rendering a data file into a LaTeX document.
///
/// # Example
/// ```rust
/// use resumetex::RenderConfig;
///
/// let config = RenderConfig::builder()
///     .data("resume_data.txt")
///     .output("out/cv.tex")
///     .build()
///     .unwrap();
/// assert!(config.backup_existing);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Template containing `{{PLACEHOLDER}}` tokens. Default: `cv.tex.template`.
    pub template: PathBuf,

    /// Structured data file. Required.
    pub data: PathBuf,

    /// Destination of the rendered document. Default: `cv.tex`.
    pub output: PathBuf,

    /// Rename an existing output to `<output>.bak_<YYYYMMDDHHMMSS>` before
    /// writing. Default: true.
    pub backup_existing: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from(DEFAULT_TEMPLATE),
            data: PathBuf::new(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            backup_existing: true,
        }
    }
}

impl RenderConfig {
    /// Create a new builder for `RenderConfig`.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            config: Self::default(),
        }
    }

    /// The template path to try when `template` does not exist.
    ///
    /// Only defined when the configured path mentions the default template
    /// name; the name is swapped for [`LEGACY_TEMPLATE`] in place.
    pub fn legacy_template(&self) -> Option<PathBuf> {
        legacy_template_for(&self.template)
    }
}

/// Swap [`DEFAULT_TEMPLATE`] for [`LEGACY_TEMPLATE`] inside `path`.
pub fn legacy_template_for(path: &Path) -> Option<PathBuf> {
    let s = path.to_string_lossy();
    if s.contains(DEFAULT_TEMPLATE) {
        Some(PathBuf::from(s.replace(DEFAULT_TEMPLATE, LEGACY_TEMPLATE)))
    } else {
        None
    }
}

/// Builder for [`RenderConfig`].
#[derive(Debug)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn template(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.template = path.into();
        self
    }

    pub fn data(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data = path.into();
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }

    pub fn backup_existing(mut self, v: bool) -> Self {
        self.config.backup_existing = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RenderConfig, ResumeError> {
        let c = &self.config;
        if c.data.as_os_str().is_empty() {
            return Err(ResumeError::InvalidConfig(
                "a data file path is required".into(),
            ));
        }
        if c.output.as_os_str().is_empty() {
            return Err(ResumeError::InvalidConfig(
                "output path must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Knobs for the text cleaner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanConfig {
    /// A fully upper-case line opens a new block only when it has fewer
    /// whitespace-separated words than this. Default: 6.
    pub header_max_words: usize,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            header_max_words: 6,
        }
    }
}

/// Knobs for the text extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Include page header and footer parts around the body. Default: true.
    pub include_headers_footers: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            include_headers_footers: true,
        }
    }
}
