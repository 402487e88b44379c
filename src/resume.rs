//! The in-memory record produced by the structured parser.
//!
//! Built once per run by [`crate::pipeline::parse::parse_data`], consumed by
//! [`crate::pipeline::blocks::build_blocks`], then dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A parsed resume data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeData {
    /// Leading `key=value` lines, sorted by key. Keys keep their original case.
    pub headers: BTreeMap<String, String>,
    /// Summary lines, joined with single spaces when rendered.
    pub summary: Vec<String>,
    pub certifications: Vec<String>,
    /// Category (upper-cased) → skills in source order.
    pub skills: BTreeMap<String, Vec<String>>,
    pub experience: Vec<ExperienceRole>,
    pub earlier_roles: Vec<EarlierRole>,
    /// Raw non-blank lines of the EDUCATION section.
    pub education: Vec<String>,
}

impl ResumeData {
    /// Header value for `key`, if present.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// Skills listed under `category`, or an empty slice.
    pub fn skills_in(&self, category: &str) -> &[String] {
        self.skills.get(category).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// One `ROLE:` entry of the EXPERIENCE section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRole {
    pub title: String,
    pub company: String,
    pub start: String,
    pub end: String,
    pub bullets: Vec<String>,
}

/// One `Company: (years)` entry of the EARLIER ROLES section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlierRole {
    pub company: String,
    pub years: String,
    pub titles: Vec<String>,
}
