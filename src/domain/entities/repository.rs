use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// ブートストラップ対象のリポジトリ定義
///
/// 1回の実行中は不変。`package_name` は実行全体で一意なキーとして扱う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    /// パッケージ名（実行内で一意）
    pub package_name: String,

    /// リモートリポジトリのURL
    pub remote_url: String,

    /// チェックアウトするブランチ名
    pub branch: String,

    /// パッケージベースディレクトリからの相対パス
    pub local_directory: PathBuf,
}

impl RepositoryDescriptor {
    /// 新しいRepositoryDescriptorインスタンスを作成
    pub fn new(
        package_name: impl Into<String>,
        remote_url: impl Into<String>,
        branch: impl Into<String>,
        local_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            remote_url: remote_url.into(),
            branch: branch.into(),
            local_directory: local_directory.into(),
        }
    }

    /// パッケージベースディレクトリと結合したローカルパスを取得
    pub fn local_path(&self, packages_base_path: &Path) -> PathBuf {
        packages_base_path.join(&self.local_directory)
    }
}
