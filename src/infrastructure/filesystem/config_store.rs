use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::debug;

use crate::common::error::RepobootError;
use crate::common::result::{OptionExt, RepobootResult, ResultExt};
use crate::domain::entities::bootstrap_config::BootstrapConfig;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "repoboot.yml";

/// Hidden directory that may hold the configuration file
pub const CONFIG_DIR_NAME: &str = ".repoboot";

/// Loads and validates `repoboot.yml`
#[derive(Debug, Clone, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Candidate locations, in lookup order
    pub fn candidate_paths(directory: &Path) -> [PathBuf; 2] {
        [
            directory.join(CONFIG_FILE_NAME),
            directory.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        ]
    }

    /// Find the configuration file in `directory` (`repoboot.yml`, then `.repoboot/repoboot.yml`)
    pub fn discover(directory: &Path) -> RepobootResult<PathBuf> {
        let [primary, hidden] = Self::candidate_paths(directory);
        [primary.clone(), hidden.clone()]
            .into_iter()
            .find(|candidate| candidate.is_file())
            .ok_or_repoboot(RepobootError::config_error(
                format!(
                    "Configuration file not found at: {} or {}",
                    primary.display(),
                    hidden.display()
                ),
                None,
            ))
    }

    /// Read, parse and validate a configuration file
    pub async fn load(&self, path: &Path) -> RepobootResult<BootstrapConfig> {
        debug!(path = %path.display(), "loading configuration");

        let content = async_fs::read_to_string(path).await.with_filesystem_error(
            format!("Failed to read configuration file {}", path.display()),
            Some(path.to_path_buf()),
        )?;

        let config = Self::parse(&content).map_err(|e| {
            RepobootError::config_error_with_source(
                format!("Invalid configuration file {}", path.display()),
                Some(path.to_path_buf()),
                e,
            )
        })?;

        debug!(
            repositories = config.repositories.len(),
            packages = %config.packages.display(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Parse and validate configuration content
    pub fn parse(content: &str) -> RepobootResult<BootstrapConfig> {
        let config: BootstrapConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Locate the configuration in `directory` and load it
    pub async fn load_from_directory(&self, directory: &Path) -> RepobootResult<BootstrapConfig> {
        let path = Self::discover(directory)?;
        self.load(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
packages: packages
repositories:
  test-package:
    url: git@github.com/organization/test-package.git
    branch: master
    directory: test-package
"#;

    #[tokio::test]
    async fn test_load_from_directory_root() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), SAMPLE).unwrap();

        let config = ConfigStore::new()
            .load_from_directory(temp_dir.path())
            .await
            .unwrap();
        assert_eq!(config.package_names(), vec!["test-package"]);
    }

    #[tokio::test]
    async fn test_load_from_hidden_directory() {
        let temp_dir = TempDir::new().unwrap();
        let hidden = temp_dir.path().join(CONFIG_DIR_NAME);
        std::fs::create_dir_all(&hidden).unwrap();
        std::fs::write(hidden.join(CONFIG_FILE_NAME), SAMPLE).unwrap();

        let path = ConfigStore::discover(temp_dir.path()).unwrap();
        assert_eq!(path, hidden.join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_discover_missing_configuration() {
        let temp_dir = TempDir::new().unwrap();
        let err = ConfigStore::discover(temp_dir.path()).unwrap_err();
        assert!(matches!(err, RepobootError::ConfigError { .. }));
        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_filesystem_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = ConfigStore::new()
            .load(&temp_dir.path().join("nope.yml"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepobootError::FileSystemError { .. }));
    }

    #[tokio::test]
    async fn test_load_invalid_yaml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "repositories: [unclosed").unwrap();

        let err = ConfigStore::new().load(&path).await.unwrap_err();
        if let RepobootError::ConfigError { file_path, .. } = err {
            assert_eq!(file_path, Some(path));
        } else {
            panic!("Expected ConfigError");
        }
    }

    #[test]
    fn test_parse_runs_validation() {
        let err = ConfigStore::parse("repositories:\n  a:\n    url: ''\n").unwrap_err();
        assert!(matches!(err, RepobootError::ValidationError { .. }));
    }
}
