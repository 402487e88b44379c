//! Text cleaning: deduplicate raw extracted text.
//!
//! Text pulled out of a word-processing document is noisy: blank paragraphs,
//! runs repeated by tracked changes, and whole sections duplicated (the same
//! summary pasted twice, a skills table repeated in a text box). The cleaner
//! removes that noise in four deterministic passes:
//!
//! 1. Drop blank lines, trim the rest
//! 2. Collapse runs of identical consecutive lines
//! 3. Drop repeated blocks (a block starts at a short all-caps header line)
//! 4. Insert a blank line after each header line
//!
//! Pass 3 compares whole block texts, so a block survives if even one line
//! differs from every earlier block.

use crate::config::CleanConfig;
use std::collections::HashSet;

/// Clean `input` and return the cleaned text, lines joined with `\n`.
pub fn clean_text(input: &str, config: &CleanConfig) -> String {
    clean_lines(input.lines(), config).join("\n")
}

/// Run all four passes over `lines`.
pub fn clean_lines<'a, I>(lines: I, config: &CleanConfig) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let lines = drop_blank_lines(lines);
    let lines = collapse_consecutive_duplicates(lines);
    let lines = drop_repeated_blocks(lines, config.header_max_words);
    space_headers(lines)
}

/// A line with at least one cased character and no lower-case or
/// title-case ones.
pub fn is_upper(line: &str) -> bool {
    let mut cased = false;
    for c in line.chars() {
        if c.is_lowercase() || is_titlecase(c) {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Cased but neither upper nor lower, e.g. `ǅ`.
fn is_titlecase(c: char) -> bool {
    !c.is_uppercase() && !c.is_lowercase() && !c.to_lowercase().eq(std::iter::once(c))
}

/// Heuristic section header: upper-case and fewer than `max_words` words.
pub fn is_block_header(line: &str, max_words: usize) -> bool {
    is_upper(line) && line.split_whitespace().count() < max_words
}

// ── Pass 1: Drop blank lines ─────────────────────────────────────────────────

fn drop_blank_lines<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

// ── Pass 2: Collapse consecutive duplicates ──────────────────────────────────

fn collapse_consecutive_duplicates(mut lines: Vec<String>) -> Vec<String> {
    lines.dedup();
    lines
}

// ── Pass 3: Drop repeated blocks ─────────────────────────────────────────────
//
// Any text before the first header forms a headerless leading block. It is
// always kept since nothing can precede it.

fn drop_repeated_blocks(lines: Vec<String>, max_words: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(lines.len());
    let mut block: Vec<String> = Vec::new();

    for line in lines {
        if is_block_header(&line, max_words) && !block.is_empty() {
            flush_block(&mut block, &mut seen, &mut result);
        }
        block.push(line);
    }
    flush_block(&mut block, &mut seen, &mut result);

    result
}

fn flush_block(block: &mut Vec<String>, seen: &mut HashSet<String>, out: &mut Vec<String>) {
    if block.is_empty() {
        return;
    }
    if seen.insert(block.join("\n")) {
        out.append(block);
    } else {
        block.clear();
    }
}

// ── Pass 4: Space after headers ──────────────────────────────────────────────
//
// Uses the plain upper-case test (no word limit): a long all-caps line still
// gets spacing, and consecutive all-caps lines stay together.

fn space_headers(lines: Vec<String>) -> Vec<String> {
    let mut result = Vec::with_capacity(lines.len() * 2);
    for (i, line) in lines.iter().enumerate() {
        result.push(line.clone());
        let next_is_upper = lines.get(i + 1).is_some_and(|next| is_upper(next));
        if is_upper(line) && !next_is_upper {
            result.push(String::new());
        }
    }
    result
}

// ── Tests ────────────────────────────────────────────────────────────────────
