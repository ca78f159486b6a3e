mod batch;
mod config;
mod generate;
mod merge;

pub use batch::{Batch, Outcome, Report, SkipReason};
pub use config::*;
pub use generate::GenerateCommand;
pub use merge::MergeCommand;

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

/// mapweave CLI library for building custom command-line tools
pub struct MapweaveCli {
    config: Option<Config>,
    base_dir: PathBuf,
}

impl MapweaveCli {
    /// Create a new MapweaveCli instance that loads its configuration from
    /// the `--config` file
    pub fn new() -> Self {
        Self {
            config: None,
            base_dir: PathBuf::new(),
        }
    }

    /// Create a new MapweaveCli instance with a custom configuration.
    /// Relative mapper locations are resolved against `base_dir`.
    pub fn with_config(config: Config, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: Some(config),
            base_dir: base_dir.into(),
        }
    }

    /// Get a reference to the configuration, if one was supplied
    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    /// Parse and execute CLI commands from command-line arguments
    pub fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli)
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        self.run(cli)
    }

    fn run(&self, cli: Cli) -> Result<()> {
        let loaded;
        let (config, base_dir) = match &self.config {
            Some(config) => (config, self.base_dir.as_path()),
            None => {
                loaded = Config::load(&cli.config)?;
                let base_dir = cli.config.parent().unwrap_or(Path::new(""));
                (&loaded, base_dir)
            }
        };

        match cli.command {
            Command::Generate(cmd) => cmd.run(config, base_dir),
            Command::Merge(cmd) => cmd.run(config),
        }
    }
}

impl Default for MapweaveCli {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Parser, Debug)]
#[command(name = "mapweave")]
#[command(about = "mapweave - Merge generated SQL statements into mapper XML files")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Merge every mapping document under the configured location
    Generate(GenerateCommand),

    /// Merge a single mapping document
    Merge(MergeCommand),
}
