//! Test fixtures for creating test data
//!
//! Configurations, run options and a harness wiring the in-memory
//! collaborators into a resolver.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use repoboot::application::use_cases::bootstrap_repository::BootstrapResolver;
use repoboot::application::use_cases::bootstrap_workspace::{
    BootstrapWorkspaceConfig, BootstrapWorkspaceUseCase,
};
use repoboot::domain::entities::bootstrap_config::{BootstrapConfig, RepositoryEntry};
use repoboot::domain::value_objects::run_options::RunOptions;

use super::mock_services::{InMemoryManifestReader, InMemoryStateChecker, RecordingShellExecutor};

pub const WORKSPACE_ROOT: &str = "/workspace";
pub const PACKAGES_DIR: &str = "packages";

/// Run options rooted at the fake workspace
pub fn run_options(recursive: bool) -> RunOptions {
    RunOptions::new(WORKSPACE_ROOT, PACKAGES_DIR).with_recursive(recursive)
}

/// Absolute directory a package resolves to under the fake workspace
pub fn package_dir(name: &str) -> PathBuf {
    Path::new(WORKSPACE_ROOT).join(PACKAGES_DIR).join(name)
}

/// Remote URL used for every configured package
pub fn remote_url(name: &str) -> String {
    format!("git@github.com:organization/{}.git", name)
}

/// Configuration declaring one repository per name with default settings
pub fn config_with(names: &[&str]) -> BootstrapConfig {
    names
        .iter()
        .fold(BootstrapConfig::new(PACKAGES_DIR), |config, name| {
            config.with_repository(*name, RepositoryEntry::new(remote_url(name)))
        })
}

/// In-memory collaborators plus helpers to build the use cases on top of them
pub struct TestHarness {
    pub shell: Arc<RecordingShellExecutor>,
    pub state: Arc<InMemoryStateChecker>,
    pub manifests: Arc<InMemoryManifestReader>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_shell(RecordingShellExecutor::new())
    }

    pub fn with_shell(shell: RecordingShellExecutor) -> Self {
        Self {
            shell: Arc::new(shell),
            state: Arc::new(InMemoryStateChecker::new()),
            manifests: Arc::new(InMemoryManifestReader::new()),
        }
    }

    /// Declare `name`'s manifest at its package directory
    pub fn depends(&self, name: &str, dependencies: &[&str], dev_dependencies: &[&str]) {
        self.manifests
            .add_manifest(package_dir(name), dependencies, dev_dependencies);
    }

    /// Mark `name` as already cloned
    pub fn present(&self, name: &str) {
        self.state.add_present(package_dir(name));
    }

    pub fn resolver(&self) -> BootstrapResolver {
        BootstrapResolver::new(
            self.shell.clone(),
            self.state.clone(),
            self.manifests.clone(),
        )
    }

    pub fn use_case(&self, requested: &[&str]) -> BootstrapWorkspaceUseCase {
        let config = BootstrapWorkspaceConfig::default()
            .with_packages(requested.iter().map(|name| name.to_string()).collect())
            .with_parallel_jobs(4);
        BootstrapWorkspaceUseCase::new(config, self.resolver())
    }
}
