use super::repository::RepositoryDescriptor;
use crate::common::error::RepobootError;
use crate::common::result::RepobootResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// ブランチ未指定時のデフォルト
pub const DEFAULT_BRANCH: &str = "master";

/// パッケージベースディレクトリ未指定時のデフォルト
pub const DEFAULT_PACKAGES_DIR: &str = "packages";

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_packages() -> PathBuf {
    PathBuf::from(DEFAULT_PACKAGES_DIR)
}

/// 設定ファイル内のリポジトリ定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    /// リモートリポジトリのURL
    pub url: String,

    /// チェックアウトするブランチ
    #[serde(default = "default_branch")]
    pub branch: String,

    /// パッケージベースディレクトリからの相対パス（省略時はパッケージ名）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl RepositoryEntry {
    /// 新しいRepositoryEntryインスタンスを作成
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            branch: default_branch(),
            directory: None,
        }
    }

    /// ブランチを設定
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// ディレクトリを設定
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }
}

/// `repoboot.yml` の内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// パッケージベースディレクトリ（作業ディレクトリからの相対パス）
    #[serde(default = "default_packages")]
    pub packages: PathBuf,

    /// パッケージ名をキーとしたリポジトリ定義
    #[serde(default)]
    pub repositories: BTreeMap<String, RepositoryEntry>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            packages: default_packages(),
            repositories: BTreeMap::new(),
        }
    }
}

impl BootstrapConfig {
    /// 新しいBootstrapConfigインスタンスを作成
    pub fn new(packages: impl Into<PathBuf>) -> Self {
        Self {
            packages: packages.into(),
            repositories: BTreeMap::new(),
        }
    }

    /// リポジトリ定義を追加
    pub fn with_repository(mut self, name: impl Into<String>, entry: RepositoryEntry) -> Self {
        self.repositories.insert(name.into(), entry);
        self
    }

    /// 設定済みかどうか
    pub fn contains(&self, name: &str) -> bool {
        self.repositories.contains_key(name)
    }

    /// 設定済みパッケージ名（名前順）
    pub fn package_names(&self) -> Vec<String> {
        self.repositories.keys().cloned().collect()
    }

    /// パッケージ名からRepositoryDescriptorを組み立てる
    pub fn descriptor(&self, name: &str) -> Option<RepositoryDescriptor> {
        self.repositories.get(name).map(|entry| {
            let directory = entry
                .directory
                .clone()
                .unwrap_or_else(|| PathBuf::from(name));
            RepositoryDescriptor::new(name, &entry.url, &entry.branch, directory)
        })
    }

    /// 全リポジトリのRepositoryDescriptor（名前順）
    pub fn descriptors(&self) -> Vec<RepositoryDescriptor> {
        self.repositories
            .keys()
            .filter_map(|name| self.descriptor(name))
            .collect()
    }

    /// 設定内容の検証
    pub fn validate(&self) -> RepobootResult<()> {
        for (name, entry) in &self.repositories {
            if name.trim().is_empty() {
                return Err(RepobootError::validation_error(
                    "repositories",
                    "package name must not be empty",
                    Some(name.clone()),
                ));
            }
            if entry.url.trim().is_empty() {
                return Err(RepobootError::validation_error(
                    format!("repositories.{}.url", name),
                    "must not be empty",
                    None,
                ));
            }
            if entry.branch.trim().is_empty() {
                return Err(RepobootError::validation_error(
                    format!("repositories.{}.branch", name),
                    "must not be empty",
                    None,
                ));
            }
            if matches!(&entry.directory, Some(dir) if dir.as_os_str().is_empty()) {
                return Err(RepobootError::validation_error(
                    format!("repositories.{}.directory", name),
                    "must not be empty",
                    None,
                ));
            }
        }
        Ok(())
    }
}
