//! Pipeline stages for turning a resume document into LaTeX.
//!
//! Each submodule implements exactly one transformation step, as a pure
//! function over in-memory text wherever possible. File I/O is confined to
//! [`input`] (reads) and [`template`] (backup + write).
//!
//! ## Data Flow
//!
//! ```text
//! docx ──▶ extract ──▶ clean ──▶ (hand edit) ──▶ parse ──▶ blocks ──▶ template
//!          (zip/xml)   (dedup)    data file      (record)  (LaTeX)   (substitute)
//! ```
//!
//! 1. [`input`]     validate paths, template legacy-name fallback, docx magic
//! 2. [`extract`]   read text runs out of the docx XML parts
//! 3. [`clean`]     drop blanks, repeated lines and repeated blocks
//! 4. [`parse`]     data file → [`crate::resume::ResumeData`]
//! 5. [`blocks`]    record → named LaTeX fragments, escaped
//! 6. [`template`]  substitute `{{NAME}}` tokens, back up old output, write

pub mod blocks;
pub mod clean;
pub mod extract;
pub mod input;
pub mod parse;
pub mod template;
