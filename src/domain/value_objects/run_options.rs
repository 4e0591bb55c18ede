use std::path::{Path, PathBuf};

/// Command-line flag that enables the dependency walk.
pub const RECURSIVE_FLAG: &str = "--recursive";

/// Options shared by every resolution of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Walk package manifests and bootstrap the dependencies they declare
    pub recursive: bool,

    /// Working directory of the run; relative paths are anchored here
    pub root_cwd: PathBuf,

    /// Base directory that repository directories are joined onto
    pub packages_base_path: PathBuf,
}

impl RunOptions {
    pub fn new(root_cwd: impl Into<PathBuf>, packages_base_path: impl Into<PathBuf>) -> Self {
        Self {
            recursive: false,
            root_cwd: root_cwd.into(),
            packages_base_path: packages_base_path.into(),
        }
    }

    /// Build options from a raw argument list, recognising [`RECURSIVE_FLAG`].
    pub fn from_args<S: AsRef<str>>(
        args: &[S],
        root_cwd: impl Into<PathBuf>,
        packages_base_path: impl Into<PathBuf>,
    ) -> Self {
        let recursive = args.iter().any(|arg| arg.as_ref() == RECURSIVE_FLAG);
        Self::new(root_cwd, packages_base_path).with_recursive(recursive)
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Anchor a path at the run's working directory.
    ///
    /// Absolute paths are returned unchanged: `Path::join` with an absolute argument
    /// replaces the base, so no separate check is needed.
    pub fn anchored(&self, path: &Path) -> PathBuf {
        self.root_cwd.join(path)
    }
}
