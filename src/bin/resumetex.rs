//! CLI binary for resumetex.
//!
//! A thin shim over the library crate that maps subcommands and flags to
//! the config structs and prints results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use resumetex::config::{DEFAULT_OUTPUT, DEFAULT_TEMPLATE};
use resumetex::{
    clean_document, clean_to_file, extract_document, extract_to_file, inspect, render,
    BackupOutcome, CleanConfig, ExtractConfig, RenderConfig,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # 1. Pull the text out of the Word document
  resumetex extract "data/Resume.docx" -o output/resume_full.txt

  # 2. Remove blank lines, repeated lines and repeated sections
  resumetex clean output/resume_full.txt -o output/resume_cleaned.txt

  # 3. (by hand) restructure the cleaned text into a data file

  # 4. Render the LaTeX resume (existing cv.tex is backed up first)
  resumetex render --data resume_data.txt

  # Check how a data file parses
  resumetex inspect --data resume_data.txt

DATA FILE SECTIONS:
  PROFESSIONAL SUMMARY   free text lines
  CERTIFICATIONS         - item
  TECHNICAL SKILLS       Category: a, b, c
  EXPERIENCE             ROLE: Title | Company | Start -- End
                         - bullet
  EARLIER ROLES          Company: (years)
                         - title
  EDUCATION              one entry per line
"#;

/// Extract, clean and render a resume into LaTeX.
#[derive(Parser, Debug)]
#[command(
    name = "resumetex",
    version,
    about = "Extract, clean and render a resume into LaTeX",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "RESUMETEX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "RESUMETEX_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract plain text from a .docx document.
    Extract {
        /// Input .docx file.
        input: PathBuf,

        /// Write text to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip page headers and footers.
        #[arg(long)]
        body_only: bool,
    },

    /// Remove blank lines, repeated lines and repeated sections.
    Clean {
        /// Extracted text file.
        input: PathBuf,

        /// Write cleaned text to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// An all-caps line opens a section only with fewer words than this.
        #[arg(long, default_value_t = CleanConfig::default().header_max_words)]
        header_max_words: usize,
    },

    /// Render a data file into the LaTeX template.
    Render {
        /// Template .tex file (falls back to cv.template.tex).
        #[arg(long, env = "RESUMETEX_TEMPLATE", default_value = DEFAULT_TEMPLATE)]
        template: PathBuf,

        /// Structured data file (*_data.txt).
        #[arg(long, env = "RESUMETEX_DATA")]
        data: PathBuf,

        /// Output .tex file to generate.
        #[arg(long, env = "RESUMETEX_OUTPUT", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Overwrite an existing output instead of backing it up.
        #[arg(long)]
        no_backup: bool,
    },

    /// Parse a data file and print the result as JSON.
    Inspect {
        /// Structured data file.
        #[arg(long, env = "RESUMETEX_DATA")]
        data: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Extract {
            input,
            output,
            body_only,
        } => {
            let config = ExtractConfig {
                include_headers_footers: !body_only,
            };
            match output {
                Some(path) => {
                    extract_to_file(&input, &path, &config)
                        .with_context(|| format!("Failed to extract {}", input.display()))?;
                    if !cli.quiet {
                        eprintln!("Full extraction complete: {}", path.display());
                    }
                }
                None => {
                    let text = extract_document(&input, &config)
                        .with_context(|| format!("Failed to extract {}", input.display()))?;
                    write_stdout(&text)?;
                }
            }
        }

        Commands::Clean {
            input,
            output,
            header_max_words,
        } => {
            let config = CleanConfig { header_max_words };
            match output {
                Some(path) => {
                    clean_to_file(&input, &path, &config)
                        .with_context(|| format!("Failed to clean {}", input.display()))?;
                    if !cli.quiet {
                        eprintln!("Cleaned resume created: {}", path.display());
                    }
                }
                None => {
                    let text = clean_document(&input, &config)
                        .with_context(|| format!("Failed to clean {}", input.display()))?;
                    write_stdout(&text)?;
                }
            }
        }

        Commands::Render {
            template,
            data,
            output,
            no_backup,
        } => {
            let config = RenderConfig::builder()
                .template(template)
                .data(data)
                .output(output)
                .backup_existing(!no_backup)
                .build()
                .context("Invalid configuration")?;

            let report = render(&config).context("Render failed")?;

            if !cli.quiet {
                match &report.backup {
                    BackupOutcome::BackedUp { path } => println!(
                        "Backed up existing {} -> {}",
                        report.output.display(),
                        path.display()
                    ),
                    BackupOutcome::Failed { .. } => {
                        println!("Warning: could not backup existing output file.")
                    }
                    BackupOutcome::NotNeeded => {}
                }
                println!("Generated LaTeX resume: {}", report.output.display());
            }
        }

        Commands::Inspect { data } => {
            let parsed =
                inspect(&data).with_context(|| format!("Failed to read {}", data.display()))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&parsed).context("Failed to serialise data")?
            );
        }
    }

    Ok(())
}

/// Write text to stdout with a trailing newline.
fn write_stdout(text: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(text.as_bytes())
        .context("Failed to write to stdout")?;
    if !text.ends_with('\n') {
        handle.write_all(b"\n").ok();
    }
    Ok(())
}
