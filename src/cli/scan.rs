use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use roadmap::{find_included, Config, FsSource, Source};
use tracing::instrument;

use super::export::Output;

/// Export every document included by a root file
///
/// The root file is searched for `\include{...}` commands; each included
/// document is read relative to the root file's directory.
#[derive(Debug, Parser)]
pub struct Scan {
    /// The root document (e.g. `srm.tex`)
    root_file: PathBuf,

    #[command(flatten)]
    output: Output,
}

impl Scan {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let root = self
            .root_file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default();
        let file_name = self
            .root_file
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("invalid root file {}", self.root_file.display()))?;

        let source = FsSource::new(root.clone(), config.clone());
        let text = source.read(file_name)?;
        let includes = find_included(&text, &config)?;
        tracing::info!(
            "{} includes {} document(s)",
            self.root_file.display(),
            includes.len()
        );

        self.output.load_and_render(&root, &includes, config)
    }
}
