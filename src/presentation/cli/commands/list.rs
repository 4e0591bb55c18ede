use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

use super::load_config;
use crate::domain::entities::bootstrap_config::BootstrapConfig;
use crate::domain::value_objects::run_options::RunOptions;
use crate::infrastructure::filesystem::repository_state::{
    FsRepositoryStateChecker, RepositoryStateChecker,
};
use crate::presentation::cli::OutputFormat;

/// One configured repository and whether it is present locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryListing {
    pub name: String,
    pub url: String,
    pub branch: String,
    pub path: PathBuf,
    pub present: bool,
}

/// Handler for the list command
pub struct ListCommand {
    pub config_path: Option<PathBuf>,
    pub packages_dir: Option<PathBuf>,
    pub output: OutputFormat,
}

impl ListCommand {
    pub fn new(
        config_path: Option<PathBuf>,
        packages_dir: Option<PathBuf>,
        output: OutputFormat,
    ) -> Self {
        Self {
            config_path,
            packages_dir,
            output,
        }
    }

    pub async fn execute(&self) -> Result<()> {
        let cwd = env::current_dir()?;
        let config = load_config(&cwd, self.config_path.as_deref()).await?;

        let packages_base = self
            .packages_dir
            .clone()
            .unwrap_or_else(|| config.packages.clone());
        let options = RunOptions::new(&cwd, packages_base);
        let listings = Self::collect(&config, &options, &FsRepositoryStateChecker::new());

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listings)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&listings)?),
            OutputFormat::Text => Self::print_text(&listings),
        }
        Ok(())
    }

    pub fn collect(
        config: &BootstrapConfig,
        options: &RunOptions,
        checker: &dyn RepositoryStateChecker,
    ) -> Vec<RepositoryListing> {
        config
            .descriptors()
            .into_iter()
            .map(|descriptor| {
                let path = descriptor.local_path(&options.packages_base_path);
                let present = checker.exists(&options.anchored(&path));
                RepositoryListing {
                    name: descriptor.package_name,
                    url: descriptor.remote_url,
                    branch: descriptor.branch,
                    path,
                    present,
                }
            })
            .collect()
    }

    fn print_text(listings: &[RepositoryListing]) {
        for listing in listings {
            let state = if listing.present {
                "✓".green()
            } else {
                "✗".red()
            };
            println!(
                "{} {} ({}) -> {}",
                state,
                listing.name.bold(),
                listing.branch.blue(),
                listing.path.display()
            );
        }
    }
}
