pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::EnvFilter;

use crate::presentation::cli::commands::{BootstrapCommand, ListCommand};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("BUILD_DATE"),
    ", ",
    env!("BUILD_TARGET"),
    ")"
);

/// Output format options for the list command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// repoboot - Clone a package and every package it depends on
#[derive(Parser, Debug)]
#[command(name = "repoboot")]
#[command(about = "Clone configured repositories and their package.json dependencies")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone repositories into the packages directory
    Bootstrap {
        /// Packages to bootstrap (if not specified, all configured packages)
        packages: Vec<String>,

        /// Follow dependencies and devDependencies from package.json
        #[arg(short, long)]
        recursive: bool,

        /// Number of parallel jobs
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Path to the configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Packages directory, relative to the working directory
        #[arg(long = "packages")]
        packages_dir: Option<PathBuf>,

        /// Timeout in seconds for each clone command
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// List configured repositories and whether they are cloned
    List {
        /// Path to the configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Packages directory, relative to the working directory
        #[arg(long = "packages")]
        packages_dir: Option<PathBuf>,

        /// Output format (text, json, yaml)
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        self.init_logging();

        if self.cli.no_color {
            colored::control::set_override(false);
        }

        // Change directory if specified
        if let Some(ref dir) = self.cli.directory {
            env::set_current_dir(dir)?;
        }

        // Handle the command
        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    fn init_logging(&self) {
        let default_directive = if self.cli.verbose {
            "repoboot=debug"
        } else {
            "warn"
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        // A subscriber may already be installed when embedded in tests
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(!self.cli.no_color)
            .try_init();
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        match &self.cli.command {
            Commands::Bootstrap {
                packages,
                recursive,
                jobs,
                config,
                packages_dir,
                timeout,
            } => {
                let command = BootstrapCommand::new(
                    packages.clone(),
                    *recursive,
                    *jobs,
                    config.clone(),
                    packages_dir.clone(),
                    *timeout,
                );
                command.execute().await
            }
            Commands::List {
                config,
                packages_dir,
                output,
            } => {
                let command = ListCommand::new(config.clone(), packages_dir.clone(), *output);
                command.execute().await
            }
        }
    }
}
