use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the package manifest read from each repository
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Manifest reader errors
#[derive(Debug, Error)]
pub enum ManifestReaderError {
    #[error("Failed to read manifest {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Dependency names declared by one package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDependencies {
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

impl PackageDependencies {
    pub fn new(dependencies: Vec<String>, dev_dependencies: Vec<String>) -> Self {
        Self {
            dependencies,
            dev_dependencies,
        }
    }

    /// Union of production and development dependency names
    pub fn all_names(&self) -> BTreeSet<String> {
        self.dependencies
            .iter()
            .chain(self.dev_dependencies.iter())
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }
}

/// Reads the dependency names a package declares. A missing manifest is not an error.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestReader: Send + Sync {
    fn read_dependencies(&self, directory: &Path) -> Result<PackageDependencies, ManifestReaderError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    dev_dependencies: BTreeMap<String, serde_json::Value>,
}

/// Reads `package.json` from the repository directory
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageJsonManifestReader;

impl PackageJsonManifestReader {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(content: &str, path: &Path) -> Result<PackageDependencies, ManifestReaderError> {
        let manifest: PackageManifest =
            serde_json::from_str(content).map_err(|source| ManifestReaderError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(PackageDependencies::new(
            manifest.dependencies.into_keys().collect(),
            manifest.dev_dependencies.into_keys().collect(),
        ))
    }
}

impl ManifestReader for PackageJsonManifestReader {
    fn read_dependencies(&self, directory: &Path) -> Result<PackageDependencies, ManifestReaderError> {
        let path = directory.join(MANIFEST_FILE_NAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PackageDependencies::default())
            }
            Err(source) => return Err(ManifestReaderError::ReadFailed { path, source }),
        };

        Self::parse(&content, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_manifest_yields_no_dependencies() {
        let temp_dir = TempDir::new().unwrap();
        let deps = PackageJsonManifestReader::new()
            .read_dependencies(temp_dir.path())
            .unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_reads_production_and_development_names() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(MANIFEST_FILE_NAME),
            r#"{
                "name": "a",
                "version": "1.0.0",
                "dependencies": { "b": "^1.0.0", "shared": "*" },
                "devDependencies": { "c": "file:../c", "shared": "*" }
            }"#,
        )
        .unwrap();

        let deps = PackageJsonManifestReader::new()
            .read_dependencies(temp_dir.path())
            .unwrap();

        assert_eq!(deps.dependencies, vec!["b", "shared"]);
        assert_eq!(deps.dev_dependencies, vec!["c", "shared"]);
        assert_eq!(
            deps.all_names().into_iter().collect::<Vec<_>>(),
            vec!["b", "c", "shared"]
        );
    }

    #[test]
    fn test_manifest_without_dependency_sections() {
        let deps = PackageJsonManifestReader::parse(r#"{"name":"a"}"#, Path::new("package.json"))
            .unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_invalid_manifest_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(MANIFEST_FILE_NAME), "{ not json").unwrap();

        let err = PackageJsonManifestReader::new()
            .read_dependencies(temp_dir.path())
            .unwrap_err();
        assert!(matches!(err, ManifestReaderError::ParseFailed { .. }));
        assert!(err.to_string().starts_with("Failed to parse manifest"));
    }
}
