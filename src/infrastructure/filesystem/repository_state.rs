use std::path::Path;

/// Decides whether a repository directory is already present locally
#[cfg_attr(test, mockall::automock)]
pub trait RepositoryStateChecker: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

/// Checks the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRepositoryStateChecker;

impl FsRepositoryStateChecker {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryStateChecker for FsRepositoryStateChecker {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
