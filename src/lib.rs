//! # resumetex
//!
//! A small pipeline for keeping a resume in LaTeX while its source of truth
//! started life as a word-processing document.
//!
//! ## Pipeline Overview
//!
//! ```text
//! resume.docx
//!  │
//!  ├─ 1. Extract  pull text runs out of the docx XML parts
//!  ├─ 2. Clean    drop blank / repeated lines and repeated sections
//!  │              (then restructure by hand into a data file)
//!  ├─ 3. Parse    data file → ResumeData (headers, sections, roles)
//!  ├─ 4. Blocks   ResumeData → named LaTeX fragments, escaped
//!  └─ 5. Render   substitute {{PLACEHOLDER}} tokens, back up, write cv.tex
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resumetex::{render, RenderConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RenderConfig::builder()
//!         .template("cv.tex.template")
//!         .data("resume_data.txt")
//!         .output("cv.tex")
//!         .build()?;
//!     let report = render(&config)?;
//!     println!("Generated LaTeX resume: {}", report.output.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resumetex` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod pipeline;
pub mod resume;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{CleanConfig, ExtractConfig, RenderConfig, RenderConfigBuilder};
pub use convert::{
    clean_document, clean_to_file, extract_document, extract_to_file, inspect, render,
    render_text, RenderReport,
};
pub use error::{ExtractionError, ResumeError};
pub use pipeline::blocks::{escape_latex, FragmentMap};
pub use pipeline::template::BackupOutcome;
pub use resume::{EarlierRole, ExperienceRole, ResumeData};
