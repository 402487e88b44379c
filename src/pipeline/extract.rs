//! Text extraction from a word-processing (docx) container.
//!
//! A docx is a zip archive of XML parts. Body text lives in
//! `word/document.xml`; page headers and footers live in
//! `word/header{N}.xml` / `word/footer{N}.xml`. Parts are emitted in
//! reading order: headers, body, footers.
//!
//! Inside a part only a handful of elements matter:
//!
//! | element          | output          |
//! |------------------|-----------------|
//! | `w:t`            | its text        |
//! | `w:tab`          | `\t`            |
//! | `w:br`, `w:cr`   | `\n`            |
//! | end of `w:p`     | `\n\n`          |
//!
//! Everything else (styles, numbering, drawings) is ignored.

use crate::config::ExtractConfig;
use crate::error::{ExtractionError, ResumeError};
use crate::pipeline::input;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, info};
use zip::ZipArchive;

const BODY_PART: &str = "word/document.xml";

/// Extract the plain text of the document at `path`.
pub fn extract_text(path: &Path, config: &ExtractConfig) -> Result<String, ResumeError> {
    let path = input::resolve_document(path)?;
    let file = File::open(&path).map_err(|source| ResumeError::ReadFailed {
        path: path.clone(),
        source,
    })?;
    let text = extract_from_reader(file, &path, config)?;
    info!(
        "Extracted {} chars of text from {}",
        text.len(),
        path.display()
    );
    Ok(text)
}

/// Extract text from any seekable docx byte source.
///
/// `label` is only used in error messages.
pub fn extract_from_reader<R: Read + Seek>(
    reader: R,
    label: &Path,
    config: &ExtractConfig,
) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(reader).map_err(|e| ExtractionError::Archive {
        path: label.to_path_buf(),
        detail: e.to_string(),
    })?;

    let names: Vec<String> = archive.file_names().map(String::from).collect();
    if !names.iter().any(|n| n == BODY_PART) {
        return Err(ExtractionError::MissingPart {
            path: label.to_path_buf(),
            part: BODY_PART.to_string(),
        });
    }

    let mut parts: Vec<String> = Vec::new();
    if config.include_headers_footers {
        parts.extend(numbered_parts(&names, "word/header"));
    }
    parts.push(BODY_PART.to_string());
    if config.include_headers_footers {
        parts.extend(numbered_parts(&names, "word/footer"));
    }

    let mut text = String::new();
    for part in &parts {
        let bytes = read_part(&mut archive, part, label)?;
        debug!("Reading part {} ({} bytes)", part, bytes.len());
        text.push_str(&xml_to_text(&bytes, part)?);
    }

    Ok(text.trim().to_string())
}

/// Part names `<prefix><digits>.xml`, ordered by their number.
fn numbered_parts(names: &[String], prefix: &str) -> Vec<String> {
    let mut found: Vec<(u32, String)> = names
        .iter()
        .filter_map(|name| {
            let digits = name.strip_prefix(prefix)?.strip_suffix(".xml")?;
            if digits.is_empty() {
                return Some((0, name.clone()));
            }
            digits.parse::<u32>().ok().map(|n| (n, name.clone()))
        })
        .collect();
    found.sort();
    found.into_iter().map(|(_, name)| name).collect()
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
    label: &Path,
) -> Result<Vec<u8>, ExtractionError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| ExtractionError::Archive {
            path: label.to_path_buf(),
            detail: format!("{name}: {e}"),
        })?;
    let mut buffer = Vec::new();
    entry
        .read_to_end(&mut buffer)
        .map_err(|e| ExtractionError::Archive {
            path: label.to_path_buf(),
            detail: format!("{name}: {e}"),
        })?;
    Ok(buffer)
}

/// Render one WordprocessingML part as plain text.
fn xml_to_text(xml: &[u8], part: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = true,
                b"tab" => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                b"p" => out.push_str("\n\n"),
                _ => {}
            },
            Ok(Event::Text(ref t)) if in_text => {
                let text = t.unescape().map_err(|e| ExtractionError::Xml {
                    part: part.to_string(),
                    position: reader.buffer_position(),
                    detail: e.to_string(),
                })?;
                out.push_str(&text);
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => out.push_str("\n\n"),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::Xml {
                    part: part.to_string(),
                    position: reader.buffer_position(),
                    detail: e.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}
