use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::{execution_result::ExecutionResult, repository::RepositoryDescriptor};
use crate::domain::value_objects::run_options::RunOptions;
use crate::infrastructure::filesystem::manifest_reader::{ManifestReader, PackageJsonManifestReader};
use crate::infrastructure::filesystem::repository_state::{
    FsRepositoryStateChecker, RepositoryStateChecker,
};
use crate::infrastructure::git::command_composer::CloneCommand;
use crate::infrastructure::process::shell_executor::{
    ShellConfig, ShellExecutor, SystemShellExecutor,
};

/// ドライバーから渡される1リポジトリ分のリクエスト
///
/// 引数リスト（`--recursive` を認識）、基本オプション（`cwd` と `packages`）、
/// およびリポジトリ定義をまとめたもの。
#[derive(Debug, Clone)]
pub struct BootstrapRequest {
    /// コマンドライン引数
    pub args: Vec<String>,

    /// 実行時の作業ディレクトリ
    pub cwd: PathBuf,

    /// パッケージベースディレクトリ
    pub packages: PathBuf,

    /// 対象リポジトリ
    pub repository: RepositoryDescriptor,
}

impl BootstrapRequest {
    /// 新しいBootstrapRequestインスタンスを作成
    pub fn new(
        args: Vec<String>,
        cwd: impl Into<PathBuf>,
        packages: impl Into<PathBuf>,
        repository: RepositoryDescriptor,
    ) -> Self {
        Self {
            args,
            cwd: cwd.into(),
            packages: packages.into(),
            repository,
        }
    }

    /// 引数からRunOptionsを組み立てる
    pub fn run_options(&self) -> RunOptions {
        RunOptions::from_args(&self.args, &self.cwd, &self.packages)
    }
}

/// 1リポジトリのブートストラップ（存在確認、クローン、依存関係の発見）
///
/// ProcessedSetへの書き込みや循環検出は行わない。それらはドライバーの責務。
pub struct BootstrapResolver {
    /// シェル実行
    shell: Arc<dyn ShellExecutor>,

    /// リポジトリの存在確認
    state_checker: Arc<dyn RepositoryStateChecker>,

    /// マニフェストの依存関係読み込み
    manifest_reader: Arc<dyn ManifestReader>,
}

impl BootstrapResolver {
    /// 新しいBootstrapResolverインスタンスを作成
    pub fn new(
        shell: Arc<dyn ShellExecutor>,
        state_checker: Arc<dyn RepositoryStateChecker>,
        manifest_reader: Arc<dyn ManifestReader>,
    ) -> Self {
        Self {
            shell,
            state_checker,
            manifest_reader,
        }
    }

    /// 実際のシェル・ファイルシステムを使うResolverを作成
    pub fn system(options: &RunOptions, timeout_seconds: Option<u64>) -> Self {
        Self::new(
            Arc::new(SystemShellExecutor::new(Self::clone_shell_config(
                options,
                timeout_seconds,
            ))),
            Arc::new(FsRepositoryStateChecker::new()),
            Arc::new(PackageJsonManifestReader::new()),
        )
    }

    /// クローン用のシェル設定（作業ディレクトリはrootCwd）
    ///
    /// 認証情報の入力待ちで止まらないよう、gitの端末プロンプトは無効にする。
    pub fn clone_shell_config(options: &RunOptions, timeout_seconds: Option<u64>) -> ShellConfig {
        let mut shell_config = ShellConfig::new()
            .with_working_directory(&options.root_cwd)
            .with_environment_variable("GIT_TERMINAL_PROMPT", "0");
        if let Some(timeout_secs) = timeout_seconds {
            shell_config = shell_config.with_timeout(timeout_secs);
        }
        shell_config
    }

    /// ドライバー向けの入口
    pub async fn handle(&self, request: &BootstrapRequest) -> ExecutionResult {
        self.resolve(&request.repository, &request.run_options())
            .await
    }

    /// リポジトリを解決する
    pub async fn resolve(
        &self,
        descriptor: &RepositoryDescriptor,
        options: &RunOptions,
    ) -> ExecutionResult {
        // 1. ローカルパスの計算
        let local_path = descriptor.local_path(&options.packages_base_path);
        let anchored_path = options.anchored(&local_path);

        // 2. 存在確認とクローン
        let result = if self.state_checker.exists(&anchored_path) {
            debug!(
                package = %descriptor.package_name,
                path = %anchored_path.display(),
                "repository already present"
            );
            ExecutionResult::already_cloned(&descriptor.package_name)
        } else {
            let command =
                CloneCommand::new(&descriptor.remote_url, &descriptor.branch, &local_path);
            info!(
                package = %descriptor.package_name,
                url = %descriptor.remote_url,
                branch = %descriptor.branch,
                "cloning repository"
            );

            match self.shell.execute(&command.to_shell_string()).await {
                Ok(output) => ExecutionResult::cloned(output),
                Err(e) => {
                    warn!(package = %descriptor.package_name, error = %e, "clone failed");
                    // No dependency walk after a failed clone.
                    return ExecutionResult::failed(&e.message, e.diagnostics);
                }
            }
        };

        if !options.recursive {
            return result;
        }

        // 3. 再帰モード: マニフェストから依存パッケージ名を収集（フィルタはドライバー側）
        match self.manifest_reader.read_dependencies(&anchored_path) {
            Ok(dependencies) => {
                let names = dependencies.all_names();
                debug!(
                    package = %descriptor.package_name,
                    discovered = names.len(),
                    "dependencies discovered"
                );
                result.with_discovered_dependency_names(names)
            }
            Err(e) => {
                warn!(package = %descriptor.package_name, error = %e, "manifest unreadable");
                result.with_manifest_error(e.to_string())
            }
        }
    }
}
