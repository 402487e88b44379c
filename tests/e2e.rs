//! End-to-end tests for resumetex.
//!
//! Every test works in its own `TempDir`; the docx fixture is assembled on
//! the fly with `zip::ZipWriter` so no binary files live in the repo.

use resumetex::config::CleanConfig;
use chrono::{Duration, Utc};
use resumetex::pipeline::blocks::{NO_CERTIFICATIONS, NO_EARLIER_ROLES};
use resumetex::pipeline::template::backup_path_for;
use resumetex::{
    clean_to_file, extract_to_file, inspect, render, BackupOutcome, ExtractConfig, RenderConfig,
    ResumeError,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

// ── Test helpers ─────────────────────────────────────────────────────────────

const TEMPLATE: &str = r"\documentclass{article}
\begin{document}
{\Huge {{NAME}}} \\ {{LOCATION}} $|$ {{PHONE}} $|$ \href{mailto:{{EMAIL}}}{{{EMAIL}}}
\href{{{WEBSITE_URL}}}{web} \href{{{LINKEDIN_URL}}}{in} \href{{{GITHUB_URL}}}{gh}
\section{Summary}
{{PROFESSIONAL_SUMMARY}}
\section{Certifications}
{{CERTIFICATIONS_BLOCK}}
\section{Skills}
Languages: {{SKILLS_LANGUAGES}} \\
Frameworks: {{SKILLS_FRAMEWORKS}} \\
DevOps: {{SKILLS_DEVOPS}} \\
Cloud: {{SKILLS_CLOUD_SECURITY}} \\
Others: {{SKILLS_OTHERS}}
\section{Experience}
{{EXPERIENCE_BLOCK}}
\section{Earlier Roles}
{{EARLIER_ROLES_BLOCK}}
\section{Education}
{{EDUCATION_BLOCK}}
\end{document}
";

const DATA: &str = "# contact
NAME=Jane Doe
EMAIL=jane_doe@example.com
LOCATION=Berlin
PHONE=+49 123
GITHUB=https://github.com/jane_doe

PROFESSIONAL SUMMARY
Platform engineer with 10 years
of experience & a taste for Rust.

CERTIFICATIONS

TECHNICAL SKILLS
Languages: Go, Rust, Python,
DevOps Tools: Docker, Kubernetes

EXPERIENCE
ROLE: Staff Engineer | Acme | 2020 -- Present
- Cut build times by 40%
- Led migration to Rust
ROLE: Engineer | Initech | 2016 -- 2020

EDUCATION
MSc Computer Science, TU Berlin
";

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn paragraph(text: &str) -> String {
    format!("<w:p><w:r><w:t xml:space=\"preserve\">{text}</w:t></w:r></w:p>")
}

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs.iter().map(|p| paragraph(p)).collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );
    let mut zip = ZipWriter::new(fs::File::create(path).unwrap());
    zip.start_file("[Content_Types].xml", FileOptions::default())
        .unwrap();
    zip.write_all(b"<Types/>").unwrap();
    zip.start_file("word/document.xml", FileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

fn render_config(dir: &Path) -> RenderConfig {
    RenderConfig::builder()
        .template(dir.join("cv.tex.template"))
        .data(dir.join("resume_data.txt"))
        .output(dir.join("cv.tex"))
        .build()
        .unwrap()
}

// ── Extract + clean ──────────────────────────────────────────────────────────

#[test]
fn test_extract_then_clean() {
    let dir = TempDir::new().unwrap();
    let docx = dir.path().join("Resume.docx");
    write_docx(
        &docx,
        &[
            "Jane Doe",
            "",
            "SUMMARY",
            "Builds reliable systems.",
            "Builds reliable systems.",
            "SKILLS",
            "Rust, Go",
            "SUMMARY",
            "Builds reliable systems.",
        ],
    );

    let full = dir.path().join("output/resume_full.txt");
    let text = extract_to_file(&docx, &full, &ExtractConfig::default()).unwrap();
    assert!(text.starts_with("Jane Doe\n\n"));
    assert_eq!(fs::read_to_string(&full).unwrap(), text);

    let cleaned_path = dir.path().join("output/resume_cleaned.txt");
    let cleaned = clean_to_file(&full, &cleaned_path, &CleanConfig::default()).unwrap();
    assert_eq!(
        cleaned,
        "Jane Doe\nSUMMARY\n\nBuilds reliable systems.\nSKILLS\n\nRust, Go"
    );
    assert_eq!(fs::read_to_string(&cleaned_path).unwrap(), cleaned);
}

#[test]
fn test_extract_rejects_non_docx() {
    let dir = TempDir::new().unwrap();
    let fake = write(dir.path(), "Resume.docx", "just text");
    let err = extract_to_file(&fake, dir.path().join("out.txt"), &ExtractConfig::default())
        .unwrap_err();
    assert!(matches!(err, ResumeError::Extraction(_)), "got {err:?}");
    assert!(!dir.path().join("out.txt").exists());
}

#[test]
fn test_extract_missing_document() {
    let dir = TempDir::new().unwrap();
    let err = extract_to_file(
        dir.path().join("nope.docx"),
        dir.path().join("out.txt"),
        &ExtractConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ResumeError::DocumentNotFound { .. }));
}

// ── Render ───────────────────────────────────────────────────────────────────

#[test]
fn test_render_full_document() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "cv.tex.template", TEMPLATE);
    write(dir.path(), "resume_data.txt", DATA);

    let report = render(&render_config(dir.path())).unwrap();
    assert!(matches!(report.backup, BackupOutcome::NotNeeded));
    assert!(report.unresolved.is_empty(), "{:?}", report.unresolved);

    let out = fs::read_to_string(dir.path().join("cv.tex")).unwrap();
    assert!(out.contains(r"{\Huge Jane Doe}"));
    assert!(out.contains(r"\href{mailto:jane\_doe@example.com}{jane\_doe@example.com}"));
    assert!(out.contains(r"\href{https://github.com/jane_doe}{gh}"));
    assert!(out.contains(r"\href{#}{web}"));
    assert!(out.contains(
        r"\item{Platform engineer with 10 years of experience \& a taste for Rust.}"
    ));
    assert!(out.contains(NO_CERTIFICATIONS));
    assert!(out.contains(r"Languages: Go, Rust, Python \\"));
    assert!(out.contains(r"DevOps: Docker, Kubernetes \\"));
    assert!(out.contains("Frameworks:  \\\\"));
    assert!(out.contains(
        "\\expProjectHeading{\\titleItem{Staff Engineer} $|$ \\emph{Acme}}{2020 -- Present}\n\
         \\expItemListStart\n\
         \\expItem{Cut build times by 40\\%}\n\
         \\expItem{Led migration to Rust}\n\
         \\expItemListEnd\n\
         \\expProjectHeading{\\titleItem{Engineer} $|$ \\emph{Initech}}{2016 -- 2020}"
    ));
    assert!(out.contains(NO_EARLIER_ROLES));
    assert!(out.contains(r"\resumeProjectHeading{\titleItem{MSc Computer Science, TU Berlin}}{}"));
    assert!(!out.contains("{{"));
}

#[test]
fn test_render_backs_up_existing_output() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "cv.tex.template", "{{NAME}}");
    write(dir.path(), "resume_data.txt", "NAME=Jane\n");
    write(dir.path(), "cv.tex", "previous run");

    let report = render(&render_config(dir.path())).unwrap();
    let backup = match report.backup {
        BackupOutcome::BackedUp { path } => path,
        other => panic!("expected a backup, got {other:?}"),
    };
    assert_eq!(fs::read_to_string(backup).unwrap(), "previous run");
    assert_eq!(fs::read_to_string(dir.path().join("cv.tex")).unwrap(), "Jane");
}

#[test]
fn test_render_continues_when_backup_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "cv.tex.template", "{{NAME}}");
    write(dir.path(), "resume_data.txt", "NAME=Jane\n");
    let out = write(dir.path(), "cv.tex", "previous run");

    // A non-empty directory at every backup name the run could pick makes
    // the rename fail.
    let now = Utc::now();
    for offset in 0..6 {
        let blocker = backup_path_for(&out, now + Duration::seconds(offset));
        fs::create_dir(&blocker).unwrap();
        write(&blocker, "keep", "x");
    }

    let report = render(&render_config(dir.path())).unwrap();
    assert!(
        matches!(report.backup, BackupOutcome::Failed { .. }),
        "got {:?}",
        report.backup
    );
    assert_eq!(fs::read_to_string(&out).unwrap(), "Jane");
}

#[test]
fn test_render_without_backup_overwrites() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "cv.tex.template", "{{NAME}}");
    write(dir.path(), "resume_data.txt", "NAME=Jane\n");
    write(dir.path(), "cv.tex", "previous run");

    let mut config = render_config(dir.path());
    config.backup_existing = false;
    render(&config).unwrap();

    let entries = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 3, "no backup file should be created");
    assert_eq!(fs::read_to_string(dir.path().join("cv.tex")).unwrap(), "Jane");
}

#[test]
fn test_render_uses_legacy_template_name() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "cv.template.tex", "Hi {{NAME}}");
    write(dir.path(), "resume_data.txt", "NAME=Jane\n");

    let report = render(&render_config(dir.path())).unwrap();
    assert_eq!(report.template, dir.path().join("cv.template.tex"));
    assert_eq!(fs::read_to_string(dir.path().join("cv.tex")).unwrap(), "Hi Jane");
}

#[test]
fn test_render_missing_template() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "resume_data.txt", "NAME=Jane\n");
    let err = render(&render_config(dir.path())).unwrap_err();
    assert!(matches!(err, ResumeError::TemplateNotFound { .. }), "got {err:?}");
    assert!(!dir.path().join("cv.tex").exists());
}

#[test]
fn test_render_missing_data() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "cv.tex.template", "{{NAME}}");
    let err = render(&render_config(dir.path())).unwrap_err();
    assert!(matches!(err, ResumeError::DataNotFound { .. }), "got {err:?}");
}

#[test]
fn test_render_reports_unknown_placeholders() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "cv.tex.template", "{{NAME}} {{HOBBIES}}");
    write(dir.path(), "resume_data.txt", "NAME=Jane\n");

    let report = render(&render_config(dir.path())).unwrap();
    assert_eq!(report.unresolved, vec!["HOBBIES"]);
    assert_eq!(
        fs::read_to_string(dir.path().join("cv.tex")).unwrap(),
        "Jane {{HOBBIES}}"
    );
}

// ── Inspect ──────────────────────────────────────────────────────────────────

#[test]
fn test_inspect_data_file() {
    let dir = TempDir::new().unwrap();
    let data = write(dir.path(), "resume_data.txt", DATA);

    let parsed = inspect(&data).unwrap();
    assert_eq!(parsed.header("NAME"), Some("Jane Doe"));
    assert_eq!(parsed.summary.len(), 2);
    assert!(parsed.certifications.is_empty());
    assert_eq!(
        parsed.skills_in("LANGUAGES"),
        ["Go".to_string(), "Rust".into(), "Python".into()]
    );
    assert_eq!(parsed.experience.len(), 2);
    assert_eq!(parsed.experience[0].end, "Present");
    assert_eq!(parsed.experience[1].bullets.len(), 0);
    assert_eq!(parsed.education.len(), 1);
}
