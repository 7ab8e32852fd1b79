use std::path::PathBuf;

use clap::Parser;
use roadmap::{Config, DocumentSet, FsSource};
use tracing::instrument;

use super::terminal::Colorize;

/// Parse source files and report what was found
#[derive(Debug, Parser)]
pub struct Check {
    /// Source files (the `.tex` extension may be omitted)
    #[arg(required = true)]
    files: Vec<String>,

    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

impl Check {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let source = FsSource::new(PathBuf::from("."), config);
        let (set, errors) = DocumentSet::load(&source, &self.files);

        if !self.quiet {
            for document in &set {
                let deliverables: usize =
                    document.projects.iter().map(|p| p.deliverables.len()).sum();
                let keytasks = document.numbered_tasks().count();
                let prereqs: usize = document
                    .projects
                    .iter()
                    .flat_map(|p| &p.deliverables)
                    .map(|d| d.prereqs.len())
                    .sum();
                println!(
                    "{}",
                    format!(
                        "✓ {}: {} project(s), {deliverables} deliverable(s), {keytasks} key task(s), {prereqs} prerequisite(s)",
                        document.name,
                        document.projects.len(),
                    )
                    .success()
                );
            }
        }

        for error in &errors {
            eprintln!("{}", format!("✗ {error}").warning());
        }

        if !errors.is_empty() {
            std::process::exit(2);
        }

        if !self.quiet && set.is_empty() {
            println!("{}", "No projects found".dim());
        }

        Ok(())
    }
}
