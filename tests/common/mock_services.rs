//! Mock services for testing
//!
//! In-memory implementations of the resolver collaborators. Each one records
//! its calls so tests can verify what the resolver asked for.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use repoboot::infrastructure::filesystem::manifest_reader::{
    ManifestReader, ManifestReaderError, PackageDependencies,
};
use repoboot::infrastructure::filesystem::repository_state::RepositoryStateChecker;
use repoboot::infrastructure::process::shell_executor::{ShellError, ShellExecutor};

/// Shell executor that records commands and answers from a script
///
/// Commands containing a registered failure pattern fail; everything else
/// succeeds with the default output.
pub struct RecordingShellExecutor {
    /// Executed commands, in call order
    call_history: Arc<Mutex<Vec<String>>>,
    /// Pattern -> error returned for commands containing it
    failures: Arc<Mutex<Vec<(String, ShellError)>>>,
    /// Output returned for successful commands
    output: String,
}

impl RecordingShellExecutor {
    pub fn new() -> Self {
        Self::with_output("")
    }

    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            call_history: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(Vec::new())),
            output: output.into(),
        }
    }

    /// Make every command containing `pattern` fail with `error`
    pub fn fail_when(&self, pattern: impl Into<String>, error: ShellError) {
        let mut failures = self.failures.lock().unwrap();
        failures.push((pattern.into(), error));
    }

    /// Get call history for verification
    pub fn get_call_history(&self) -> Vec<String> {
        self.call_history.lock().unwrap().clone()
    }

    /// Number of executed commands containing `pattern`
    pub fn count_matching(&self, pattern: &str) -> usize {
        self.get_call_history()
            .iter()
            .filter(|command| command.contains(pattern))
            .count()
    }
}

#[async_trait]
impl ShellExecutor for RecordingShellExecutor {
    async fn execute(&self, command: &str) -> Result<String, ShellError> {
        self.call_history.lock().unwrap().push(command.to_string());

        let failures = self.failures.lock().unwrap();
        if let Some((_, error)) = failures
            .iter()
            .find(|(pattern, _)| command.contains(pattern.as_str()))
        {
            return Err(error.clone());
        }
        Ok(self.output.clone())
    }
}

/// State checker backed by a set of present paths
pub struct InMemoryStateChecker {
    present: Arc<Mutex<HashSet<PathBuf>>>,
    call_history: Arc<Mutex<Vec<PathBuf>>>,
}

impl InMemoryStateChecker {
    pub fn new() -> Self {
        Self {
            present: Arc::new(Mutex::new(HashSet::new())),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_present(&self, path: impl Into<PathBuf>) {
        self.present.lock().unwrap().insert(path.into());
    }

    pub fn get_call_history(&self) -> Vec<PathBuf> {
        self.call_history.lock().unwrap().clone()
    }
}

impl RepositoryStateChecker for InMemoryStateChecker {
    fn exists(&self, path: &Path) -> bool {
        self.call_history.lock().unwrap().push(path.to_path_buf());
        self.present.lock().unwrap().contains(path)
    }
}

/// Manifest reader backed by a map from directory to dependencies
pub struct InMemoryManifestReader {
    manifests: Arc<Mutex<HashMap<PathBuf, PackageDependencies>>>,
    /// Directories whose manifest fails to parse
    unparsable: Arc<Mutex<HashSet<PathBuf>>>,
    call_history: Arc<Mutex<Vec<PathBuf>>>,
}

impl InMemoryManifestReader {
    pub fn new() -> Self {
        Self {
            manifests: Arc::new(Mutex::new(HashMap::new())),
            unparsable: Arc::new(Mutex::new(HashSet::new())),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make the manifest in `directory` fail to parse
    pub fn add_unparsable(&self, directory: impl Into<PathBuf>) {
        self.unparsable.lock().unwrap().insert(directory.into());
    }

    pub fn add_manifest(
        &self,
        directory: impl Into<PathBuf>,
        dependencies: &[&str],
        dev_dependencies: &[&str],
    ) {
        let manifest = PackageDependencies::new(
            dependencies.iter().map(|d| d.to_string()).collect(),
            dev_dependencies.iter().map(|d| d.to_string()).collect(),
        );
        self.manifests
            .lock()
            .unwrap()
            .insert(directory.into(), manifest);
    }

    pub fn get_call_history(&self) -> Vec<PathBuf> {
        self.call_history.lock().unwrap().clone()
    }
}

impl ManifestReader for InMemoryManifestReader {
    fn read_dependencies(&self, directory: &Path) -> Result<PackageDependencies, ManifestReaderError> {
        self.call_history
            .lock()
            .unwrap()
            .push(directory.to_path_buf());
        if self.unparsable.lock().unwrap().contains(directory) {
            let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
            return Err(ManifestReaderError::ParseFailed {
                path: directory.join("package.json"),
                source,
            });
        }
        Ok(self
            .manifests
            .lock()
            .unwrap()
            .get(directory)
            .cloned()
            .unwrap_or_default())
    }
}
