use std::path::{Path, PathBuf};

mod check;
mod export;
mod scan;
mod terminal;

use check::Check;
use clap::ArgAction;
use export::Export;
use roadmap::Config;
use scan::Scan;
use tracing::instrument;

const DEFAULT_CONFIG: &str = "roadmap.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.run(&self.config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Export the key task table or hierarchy for the given files
    Export(Export),

    /// Export every document included by a root file
    Scan(Scan),

    /// Parse files and report what was found
    Check(Check),

    /// Write a default configuration file
    Init,
}

impl Command {
    fn run(self, config_path: &Path) -> anyhow::Result<()> {
        match self {
            Self::Init => Init::run(config_path)?,
            Self::Export(command) => command.run(Config::load_or_default(config_path))?,
            Self::Scan(command) => command.run(Config::load_or_default(config_path))?,
            Self::Check(command) => command.run(Config::load_or_default(config_path))?,
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Init;

impl Init {
    #[instrument]
    fn run(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!("Configuration already exists at {}", path.display());
        }

        Config::default()
            .save(path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", path.display()))?;

        println!("Created {}", path.display());
        println!();
        println!("Next steps:");
        println!("  roadmap export chapter.tex");
        println!("  roadmap scan srm.tex --format tree");

        Ok(())
    }
}
