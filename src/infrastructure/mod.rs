/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Git command composition (clone, cd, checkout)
/// - File system operations (configuration, package manifests, repository presence)
/// - Process execution (shell command runner)
pub mod filesystem;
pub mod git;
pub mod process;

// Re-export commonly used types
pub use filesystem::{
    config_store::ConfigStore,
    manifest_reader::{ManifestReader, PackageJsonManifestReader},
    repository_state::{FsRepositoryStateChecker, RepositoryStateChecker},
};
pub use git::CloneCommand;
pub use process::{ShellExecutor, SystemShellExecutor};
