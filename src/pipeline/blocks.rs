//! Block building: turn a parsed [`ResumeData`] into named LaTeX fragments.
//!
//! Every user-supplied value goes through [`escape_latex`] exactly once on
//! its way into a fragment. Each rule always yields a value: empty sections
//! produce a `% No ...` comment so the template still compiles and the
//! omission is visible in the generated source.
//!
//! The macros referenced (`\expProjectHeading`, `\titleItem`, `\expItem`,
//! `\resumeProjectHeading`, ...) are defined by the template.

use crate::resume::ResumeData;

/// Fragment name → rendered text, in insertion order.
///
/// Order is the substitution order used by
/// [`crate::pipeline::template::apply_template`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentMap {
    entries: Vec<(String, String)>,
}

impl FragmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Append every entry of `other`, replacing duplicates in place.
    pub fn extend(&mut self, other: FragmentMap) {
        for (k, v) in other.entries {
            self.insert(k, v);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FragmentMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = FragmentMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

pub const NO_CERTIFICATIONS: &str = "% No certifications";
pub const NO_EXPERIENCE: &str = "% No experience roles parsed";
pub const NO_EARLIER_ROLES: &str = "% No earlier roles";
pub const NO_EDUCATION: &str = "% No education entries";

/// Skill fragments and the category each one reads.
pub const SKILL_FRAGMENTS: [(&str, &str); 5] = [
    ("SKILLS_LANGUAGES", "LANGUAGES"),
    ("SKILLS_FRAMEWORKS", "FRAMEWORKS"),
    ("SKILLS_DEVOPS", "DEVOPS TOOLS"),
    ("SKILLS_CLOUD_SECURITY", "CLOUD AND SECURITY TOOLS"),
    ("SKILLS_OTHERS", "OTHERS"),
];

// Line break between earlier employers inside the single \item.
const EARLIER_ROLES_SEPARATOR: &str = " \\\\[-2pt]\n        ";

/// Escape LaTeX special characters.
///
/// Not idempotent: escaping `\&` again yields `\textbackslash{}\&`.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '\\' => out.push_str(r"\textbackslash{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Build every section fragment from `data`.
pub fn build_blocks(data: &ResumeData) -> FragmentMap {
    let mut blocks = FragmentMap::new();

    blocks.insert("PROFESSIONAL_SUMMARY", summary_block(data));
    blocks.insert("CERTIFICATIONS_BLOCK", certifications_block(data));
    for (fragment, category) in SKILL_FRAGMENTS {
        blocks.insert(fragment, skills_line(data, category));
    }
    blocks.insert("EXPERIENCE_BLOCK", experience_block(data));
    blocks.insert("EARLIER_ROLES_BLOCK", earlier_roles_block(data));
    blocks.insert("EDUCATION_BLOCK", education_block(data));

    blocks
}

/// Contact placeholders taken from the header block.
///
/// Text fields are escaped; URL fields are passed through untouched and
/// default to `#` when missing or empty.
pub fn header_fields(data: &ResumeData) -> FragmentMap {
    let mut map = FragmentMap::new();
    for key in ["NAME", "LOCATION", "PHONE", "EMAIL"] {
        map.insert(key, escape_latex(data.header(key).unwrap_or_default()));
    }
    for (placeholder, key) in [
        ("WEBSITE_URL", "WEBSITE"),
        ("LINKEDIN_URL", "LINKEDIN"),
        ("GITHUB_URL", "GITHUB"),
    ] {
        let url = data.header(key).filter(|v| !v.is_empty()).unwrap_or("#");
        map.insert(placeholder, url);
    }
    map
}

/// Header fields followed by section blocks: the full substitution map.
pub fn placeholder_map(data: &ResumeData) -> FragmentMap {
    let mut map = header_fields(data);
    map.extend(build_blocks(data));
    map
}

fn summary_block(data: &ResumeData) -> String {
    if data.summary.is_empty() {
        return r"\item{ }".to_string();
    }
    format!(r"\item{{{}}}", escape_latex(&data.summary.join(" ")))
}

fn certifications_block(data: &ResumeData) -> String {
    if data.certifications.is_empty() {
        return NO_CERTIFICATIONS.to_string();
    }
    data.certifications
        .iter()
        .map(|cert| format!(r"\item {{{}}}", escape_latex(cert)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn skills_line(data: &ResumeData, category: &str) -> String {
    data.skills_in(category)
        .iter()
        .map(|s| escape_latex(s))
        .collect::<Vec<_>>()
        .join(", ")
}

fn experience_block(data: &ResumeData) -> String {
    if data.experience.is_empty() {
        return NO_EXPERIENCE.to_string();
    }
    let mut lines = Vec::new();
    for role in &data.experience {
        let dates = format!("{} -- {}", role.start, role.end);
        lines.push(format!(
            r"\expProjectHeading{{\titleItem{{{}}} $|$ \emph{{{}}}}}{{{}}}",
            escape_latex(&role.title),
            escape_latex(&role.company),
            escape_latex(dates.trim()),
        ));
        if !role.bullets.is_empty() {
            lines.push(r"\expItemListStart".to_string());
            for bullet in &role.bullets {
                lines.push(format!(r"\expItem{{{}}}", escape_latex(bullet)));
            }
            lines.push(r"\expItemListEnd".to_string());
        }
    }
    lines.join("\n")
}

fn earlier_roles_block(data: &ResumeData) -> String {
    if data.earlier_roles.is_empty() {
        return NO_EARLIER_ROLES.to_string();
    }
    let parts: Vec<String> = data
        .earlier_roles
        .iter()
        .map(|employer| {
            let header = if employer.years.is_empty() {
                employer.company.clone()
            } else {
                format!("{} ({})", employer.company, employer.years)
            };
            if employer.titles.is_empty() {
                format!(r"\titleItem{{{}}}", escape_latex(&header))
            } else {
                format!(
                    r"\titleItem{{{}}}{{: {}}}",
                    escape_latex(&header),
                    escape_latex(&employer.titles.join("; "))
                )
            }
        })
        .collect();
    format!(r"\item{{{}}}", parts.join(EARLIER_ROLES_SEPARATOR))
}

fn education_block(data: &ResumeData) -> String {
    let lines: Vec<String> = data
        .education
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| format!(r"\resumeProjectHeading{{\titleItem{{{}}}}}{{}}", escape_latex(l)))
        .collect();
    if lines.is_empty() {
        NO_EDUCATION.to_string()
    } else {
        lines.join("\n")
    }
}
