use std::{
    fmt,
    io::{self, Write},
    path::Path,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use roadmap::{render, storage::LoadError, Config, DocumentSet, FsSource};
use tracing::instrument;

use super::terminal::{self, Terminal};

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum Format {
    /// Confluence wiki markup table of key tasks
    #[default]
    Confluence,
    /// CSV table of key tasks
    Csv,
    /// Full hierarchy as JSON, keyed by document
    Json,
    /// Full hierarchy as YAML, keyed by document
    Yaml,
    /// Human-readable outline
    Tree,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Confluence => "confluence",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Tree => "tree",
        })
    }
}

/// Options shared by every command that writes a rendering.
#[derive(Debug, Parser)]
pub struct Output {
    /// Output format
    #[arg(long, short, value_enum, default_value_t)]
    format: Format,

    /// Render the documents that parsed, skipping those that failed
    #[arg(long)]
    keep_going: bool,
}

impl Output {
    /// Loads the referenced documents and renders them to stdout.
    pub fn load_and_render(
        &self,
        root: &Path,
        references: &[String],
        config: Config,
    ) -> anyhow::Result<()> {
        let status = config.status_macro.clone();
        let source = FsSource::new(root.to_path_buf(), config);
        let (set, errors) = DocumentSet::load(&source, references);
        self.check_errors(&errors)?;

        let stdout = io::stdout();
        let mut writer = stdout.lock();
        self.render(&mut writer, &set, &status)?;
        writer.flush().context("failed to flush output")?;
        Ok(())
    }

    fn check_errors(&self, errors: &[LoadError]) -> anyhow::Result<()> {
        use terminal::Colorize;

        if errors.is_empty() {
            return Ok(());
        }
        for error in errors {
            eprintln!("{}", format!("✗ {error}").warning());
        }
        if self.keep_going {
            Ok(())
        } else {
            anyhow::bail!(
                "{} document(s) failed to parse (use --keep-going to render the rest)",
                errors.len()
            )
        }
    }

    fn render<W: Write>(&self, writer: &mut W, set: &DocumentSet, status: &str) -> anyhow::Result<()> {
        match self.format {
            Format::Confluence => render::confluence(writer, set, status)?,
            Format::Csv => render::csv(writer, set, status)?,
            Format::Json => render::json(writer, set)?,
            Format::Yaml => render::yaml(writer, set)?,
            Format::Tree => render::tree(writer, set, &Terminal)?,
        }
        Ok(())
    }
}

/// Export the hierarchy found in the given source files
#[derive(Debug, Parser)]
pub struct Export {
    /// Source files (the `.tex` extension may be omitted)
    #[arg(required = true)]
    files: Vec<String>,

    #[command(flatten)]
    output: Output,
}

impl Export {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        tracing::info!(format = %self.output.format, "exporting {} file(s)", self.files.len());
        self.output
            .load_and_render(Path::new("."), &self.files, config)
    }
}
