use anyhow::Result;
use colored::Colorize;
use std::env;
use std::path::PathBuf;

use super::load_config;
use crate::application::use_cases::bootstrap_repository::BootstrapResolver;
use crate::application::use_cases::bootstrap_workspace::{
    BootstrapReport, BootstrapWorkspaceConfig, BootstrapWorkspaceUseCase, RepositoryOutcome,
};
use crate::domain::value_objects::run_options::RunOptions;

/// Handler for the bootstrap command
pub struct BootstrapCommand {
    pub packages: Vec<String>,
    pub recursive: bool,
    pub jobs: Option<usize>,
    pub config_path: Option<PathBuf>,
    pub packages_dir: Option<PathBuf>,
    pub timeout: Option<u64>,
}

impl BootstrapCommand {
    pub fn new(
        packages: Vec<String>,
        recursive: bool,
        jobs: Option<usize>,
        config_path: Option<PathBuf>,
        packages_dir: Option<PathBuf>,
        timeout: Option<u64>,
    ) -> Self {
        Self {
            packages,
            recursive,
            jobs,
            config_path,
            packages_dir,
            timeout,
        }
    }

    pub async fn execute(&self) -> Result<()> {
        let cwd = env::current_dir()?;
        let config = load_config(&cwd, self.config_path.as_deref()).await?;

        let packages_base = self
            .packages_dir
            .clone()
            .unwrap_or_else(|| config.packages.clone());
        let options = RunOptions::new(&cwd, packages_base).with_recursive(self.recursive);

        // Create configuration
        let mut use_case_config = BootstrapWorkspaceConfig::default();
        if !self.packages.is_empty() {
            use_case_config = use_case_config.with_packages(self.packages.clone());
        }
        if let Some(jobs) = self.jobs {
            use_case_config = use_case_config.with_parallel_jobs(jobs);
        }

        // Execute the use case
        let resolver = BootstrapResolver::system(&options, self.timeout);
        let use_case = BootstrapWorkspaceUseCase::new(use_case_config, resolver);

        println!("{} Bootstrapping repositories...", "::".blue().bold());

        let report = use_case
            .execute(&config, &options)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bootstrap repositories: {}", e))?;

        Self::print_report(&report);

        let failures = report.failures().len();
        if failures > 0 {
            return Err(anyhow::anyhow!(
                "{} repositories failed to bootstrap",
                failures
            ));
        }
        Ok(())
    }

    fn print_report(report: &BootstrapReport) {
        for outcome in &report.outcomes {
            Self::print_outcome(outcome);
        }

        if !report.configuration_gaps.is_empty() {
            let names: Vec<&str> = report
                .configuration_gaps
                .iter()
                .map(String::as_str)
                .collect();
            println!(
                "{} Skipped dependencies without configuration: {}",
                "⚠".yellow().bold(),
                names.join(", ")
            );
        }

        if report.is_success() {
            println!(
                "{} Bootstrap completed! ({} cloned, {} already present)",
                "✓".green().bold(),
                report.cloned_count(),
                report.already_present_count()
            );
        } else {
            println!("{} Some repositories failed:", "⚠".yellow().bold());
            for failure in report.failures() {
                println!("  {}", failure.package_name.red());
            }
        }

        if let Some(summary) = report.summary() {
            println!("{}", summary);
        }
    }

    fn print_outcome(outcome: &RepositoryOutcome) {
        let marker = if !outcome.result.is_success() {
            "✗".red().bold()
        } else if outcome.result.cloned_newly() {
            "✓".green().bold()
        } else {
            "·".normal()
        };
        println!("{} {}", marker, outcome.package_name.bold());

        for line in outcome.result.info_logs() {
            for text in line.lines().filter(|l| !l.trim().is_empty()) {
                println!("  {}", text);
            }
        }
        for line in outcome.result.error_logs() {
            println!("  {}", line.red());
        }
    }
}
