//! Structured parser for the resume data file.
//!
//! ## Format
//!
//! ```text
//! NAME=Jane Doe            ← header block: key=value, ends at first blank line
//! EMAIL=jane@example.com
//!
//! EXPERIENCE               ← section marker (case-insensitive, whole line)
//! ROLE: Engineer | Acme | 2020 -- 2022
//! - Built things           ← attaches to the last ROLE
//! ```
//!
//! `#` lines are comments anywhere. Lines that match no rule of the current
//! section are dropped; the parser never fails on content.

use crate::resume::{EarlierRole, ExperienceRole, ResumeData};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Sections recognised by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Certifications,
    Skills,
    Experience,
    EarlierRoles,
    Education,
}

impl Section {
    /// Match a whole line against the six section markers.
    pub fn from_marker(line: &str) -> Option<Self> {
        match line.trim().to_uppercase().as_str() {
            "PROFESSIONAL SUMMARY" => Some(Section::Summary),
            "CERTIFICATIONS" => Some(Section::Certifications),
            "TECHNICAL SKILLS" => Some(Section::Skills),
            "EXPERIENCE" => Some(Section::Experience),
            "EARLIER ROLES" => Some(Section::EarlierRoles),
            "EDUCATION" => Some(Section::Education),
            _ => None,
        }
    }
}

// `Company Name: (2010--2014)`
static RE_EARLIER_EMPLOYER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:]+):\s*\(([^)]+)\)").unwrap());

/// Parse a whole data file.
pub fn parse_data(text: &str) -> ResumeData {
    let mut parser = DataParser::default();
    let mut lines = text.lines();

    // Header phase: everything up to the first blank line.
    for raw in lines.by_ref() {
        let line = raw.trim();
        if line.is_empty() {
            break;
        }
        parser.header_line(line);
    }

    for raw in lines {
        parser.section_line(raw.trim());
    }

    let data = parser.finish();
    debug!(
        headers = data.headers.len(),
        roles = data.experience.len(),
        earlier = data.earlier_roles.len(),
        "Parsed data file"
    );
    data
}

/// Single-pass cursor: the record being built plus the active section.
///
/// Bullets always attach to the last role of the active list, so no
/// separate "open record" index is needed.
#[derive(Debug, Default)]
struct DataParser {
    data: ResumeData,
    section: Option<Section>,
}

impl DataParser {
    fn header_line(&mut self, line: &str) {
        if line.starts_with('#') {
            return;
        }
        if let Some((key, value)) = line.split_once('=') {
            self.data
                .headers
                .insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    fn section_line(&mut self, line: &str) {
        if line.is_empty() || line.starts_with('#') {
            return;
        }
        if let Some(section) = Section::from_marker(line) {
            self.section = Some(section);
            return;
        }
        match self.section {
            Some(Section::Summary) => self.summary_line(line),
            Some(Section::Certifications) => self.certification_line(line),
            Some(Section::Skills) => self.skills_line(line),
            Some(Section::Experience) => self.experience_line(line),
            Some(Section::EarlierRoles) => self.earlier_role_line(line),
            Some(Section::Education) => self.data.education.push(line.to_string()),
            None => {}
        }
    }

    fn summary_line(&mut self, line: &str) {
        if !line.starts_with('-') {
            self.data.summary.push(line.to_string());
        }
    }

    fn certification_line(&mut self, line: &str) {
        if let Some(item) = list_item(line) {
            self.data.certifications.push(item.to_string());
        }
    }

    fn skills_line(&mut self, line: &str) {
        let Some((category, list)) = line.split_once(':') else {
            return;
        };
        let skills = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        self.data
            .skills
            .insert(category.trim().to_uppercase(), skills);
    }

    fn experience_line(&mut self, line: &str) {
        if let Some(decl) = line.strip_prefix("ROLE:") {
            self.data.experience.push(parse_role(decl));
        } else if let Some(bullet) = list_item(line) {
            if let Some(role) = self.data.experience.last_mut() {
                role.bullets.push(bullet.to_string());
            }
        }
    }

    fn earlier_role_line(&mut self, line: &str) {
        if let Some(caps) = RE_EARLIER_EMPLOYER.captures(line) {
            self.data.earlier_roles.push(EarlierRole {
                company: caps[1].trim().to_string(),
                years: caps[2].trim().to_string(),
                titles: Vec::new(),
            });
        } else if let Some(title) = list_item(line) {
            if let Some(employer) = self.data.earlier_roles.last_mut() {
                employer.titles.push(title.to_string());
            }
        }
    }

    fn finish(self) -> ResumeData {
        self.data
    }
}

/// `- item` → `item`, trimmed.
fn list_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ").map(str::trim)
}

/// `Title | Company | Start -- End`; missing parts default to empty.
fn parse_role(decl: &str) -> ExperienceRole {
    let mut parts = decl.trim().split('|').map(str::trim);
    let title = parts.next().unwrap_or_default().to_string();
    let company = parts.next().unwrap_or_default().to_string();
    let dates = parts.next().unwrap_or_default();
    let (start, end) = match dates.split_once("--") {
        Some((start, end)) => (start.trim().to_string(), end.trim().to_string()),
        None => (dates.to_string(), String::new()),
    };
    ExperienceRole {
        title,
        company,
        start,
        end,
        bullets: Vec::new(),
    }
}
