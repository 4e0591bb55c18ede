//! # repoboot - Multi-repository bootstrap
//!
//! `repoboot` clones a set of configured git repositories into a packages directory and,
//! on request, follows each package's `package.json` dependencies to clone the repositories
//! those packages depend on. Every repository is handled at most once per run, so dependency
//! cycles and diamonds are safe.
//!
//! ## Features
//!
//! - **Idempotent bootstrap**: Repositories already on disk are reported, never re-cloned
//! - **Recursive mode**: `dependencies` and `devDependencies` are followed level by level
//! - **Parallel clones**: Each recursion level is resolved concurrently with a job limit
//! - **YAML configuration**: Repositories are declared once in `repoboot.yml`
//!
//! ## Quick Start
//!
//! 1. Create a configuration file (`repoboot.yml`):
//!
//! ```yaml
//! packages: packages
//! repositories:
//!   frontend:
//!     url: "git@github.com:example/frontend.git"
//!   ui-kit:
//!     url: "git@github.com:example/ui-kit.git"
//!     branch: develop
//! ```
//!
//! 2. Bootstrap a package and everything it depends on:
//!
//! ```bash
//! repoboot bootstrap frontend --recursive
//! ```
//!
//! ## Architecture
//!
//! The crate is organized using clean architecture principles:
//!
//! - [`domain`]: Repository descriptors, run options, results and the processed set
//! - [`application`]: The single-repository resolver and the multi-repository driver
//! - [`infrastructure`]: Shell execution, command composition and file system access
//! - [`presentation`]: CLI interface and user interaction
//! - [`common`]: Shared error handling
//!
//! ## Use Cases
//!
//! - [`application::use_cases::bootstrap_repository::BootstrapResolver`]: Resolve one repository
//! - [`application::use_cases::bootstrap_workspace::BootstrapWorkspaceUseCase`]: Resolve a
//!   requested set of repositories and, in recursive mode, their dependency closure
//!
//! ## Error Handling
//!
//! - [`common::error::RepobootError`]: Main error type with detailed context
//! - [`common::result::RepobootResult`]: Type alias for `Result<T, RepobootError>`
//!
//! ## Examples
//!
//! ```rust,no_run
//! use repoboot::application::use_cases::{
//!     BootstrapResolver, BootstrapWorkspaceConfig, BootstrapWorkspaceUseCase,
//! };
//! use repoboot::domain::value_objects::RunOptions;
//! use repoboot::infrastructure::ConfigStore;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigStore::new().load(Path::new("repoboot.yml")).await?;
//! let options = RunOptions::new(".", config.packages.clone()).with_recursive(true);
//!
//! let use_case = BootstrapWorkspaceUseCase::new(
//!     BootstrapWorkspaceConfig::default().with_packages(vec!["frontend".to_string()]),
//!     BootstrapResolver::system(&options, None),
//! );
//! let report = use_case.execute(&config, &options).await?;
//!
//! if let Some(summary) = report.summary() {
//!     println!("{}", summary);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::RepobootError;
pub use crate::common::result::RepobootResult as Result;
