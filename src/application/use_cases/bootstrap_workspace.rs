use std::collections::{BTreeSet, HashSet};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::bootstrap_repository::BootstrapResolver;
use crate::common::error::RepobootError;
use crate::domain::entities::{
    bootstrap_config::BootstrapConfig,
    execution_result::ExecutionResult,
    processed_set::{ProcessedSet, SharedProcessedSet},
    repository::RepositoryDescriptor,
};
use crate::domain::value_objects::run_options::RunOptions;

/// BootstrapWorkspace関連のエラー
#[derive(Debug, Error)]
pub enum BootstrapWorkspaceError {
    #[error("Unknown repository: {0}")]
    UnknownRepository(String),

    #[error("No repositories configured")]
    NoRepositories,

    #[error(transparent)]
    Config(#[from] RepobootError),
}

/// ブートストラップ実行の設定
#[derive(Debug, Clone, Default)]
pub struct BootstrapWorkspaceConfig {
    /// 対象パッケージ（Noneの場合は設定済みの全パッケージ）
    pub packages: Option<Vec<String>>,

    /// 並列実行の最大数（Noneの場合はCPU数）
    pub parallel_jobs: Option<usize>,
}

impl BootstrapWorkspaceConfig {
    pub fn with_packages(mut self, packages: Vec<String>) -> Self {
        self.packages = Some(packages);
        self
    }

    pub fn with_parallel_jobs(mut self, parallel_jobs: usize) -> Self {
        self.parallel_jobs = Some(parallel_jobs);
        self
    }

    /// 実際の並列数（最低1）
    pub fn max_concurrency(&self) -> usize {
        self.parallel_jobs.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// 1リポジトリ分の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOutcome {
    /// パッケージ名
    pub package_name: String,

    /// 再帰の深さ（明示的に指定されたものは0）
    pub depth: usize,

    /// 解決結果
    pub result: ExecutionResult,
}

/// ブートストラップ全体の結果
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// 解決順の結果
    pub outcomes: Vec<RepositoryOutcome>,

    /// 設定に存在しなかった依存パッケージ名
    pub configuration_gaps: BTreeSet<String>,

    /// 処理済みパッケージ
    pub processed: ProcessedSet,

    /// 再帰モードで実行したか
    pub recursive: bool,
}

impl BootstrapReport {
    /// 新規クローン数
    pub fn cloned_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.result.cloned_newly())
            .count()
    }

    /// 既存だった数
    pub fn already_present_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_success() && !o.result.cloned_newly())
            .count()
    }

    /// 失敗した結果
    pub fn failures(&self) -> Vec<&RepositoryOutcome> {
        self.outcomes
            .iter()
            .filter(|o| !o.result.is_success())
            .collect()
    }

    /// 失敗がなかったか
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_success())
    }

    /// 再帰実行の最後に一度だけ表示するサマリー行
    pub fn summary(&self) -> Option<String> {
        self.recursive.then(|| self.processed.summarize())
    }
}

/// ワークスペースのブートストラップ（ドライバー）
///
/// 再帰レベルごとに幅優先で解決する。各パッケージは1回の実行で最大1回だけ解決される。
pub struct BootstrapWorkspaceUseCase {
    /// 実行設定
    config: BootstrapWorkspaceConfig,

    /// 1リポジトリの解決
    resolver: BootstrapResolver,
}

impl BootstrapWorkspaceUseCase {
    /// 新しいBootstrapWorkspaceUseCaseインスタンスを作成
    pub fn new(config: BootstrapWorkspaceConfig, resolver: BootstrapResolver) -> Self {
        Self { config, resolver }
    }

    /// ブートストラップを実行
    pub async fn execute(
        &self,
        bootstrap_config: &BootstrapConfig,
        options: &RunOptions,
    ) -> Result<BootstrapReport, BootstrapWorkspaceError> {
        // 1. 対象パッケージの決定
        let mut frontier = self.determine_requested_packages(bootstrap_config)?;

        // 2. 実行スコープの状態（ProcessedSetは実行ごとに新規作成）
        let processed = SharedProcessedSet::new();
        let mut scheduled: HashSet<String> = HashSet::new();
        let mut configuration_gaps = BTreeSet::new();
        let mut outcomes = Vec::new();
        let semaphore = Semaphore::new(self.config.max_concurrency());

        // 3. レベルごとの解決
        let mut depth = 0;
        while !frontier.is_empty() {
            let level: Vec<RepositoryDescriptor> = frontier
                .into_iter()
                .filter(|name| !processed.seen(name) && scheduled.insert(name.clone()))
                .filter_map(|name| bootstrap_config.descriptor(&name))
                .collect();

            debug!(depth, repositories = level.len(), "resolving level");

            let results = self
                .resolve_level(&level, options, &semaphore, &processed)
                .await;

            let mut discovered = BTreeSet::new();
            for (descriptor, result) in level.into_iter().zip(results) {
                if let Some(names) = result.discovered_dependency_names() {
                    discovered.extend(names.iter().cloned());
                }
                outcomes.push(RepositoryOutcome {
                    package_name: descriptor.package_name,
                    depth,
                    result,
                });
            }

            // 4. 次のレベルの決定
            frontier = Self::next_level(
                discovered,
                bootstrap_config,
                &processed,
                &scheduled,
                &mut configuration_gaps,
            );
            depth += 1;
        }

        let report = BootstrapReport {
            outcomes,
            configuration_gaps,
            processed: processed.snapshot(),
            recursive: options.recursive,
        };

        info!(
            processed = report.processed.len(),
            cloned = report.cloned_count(),
            failed = report.failures().len(),
            "bootstrap finished"
        );

        Ok(report)
    }

    /// 指定されたパッケージを検証し、重複を除いた順序付きリストを返す
    fn determine_requested_packages(
        &self,
        bootstrap_config: &BootstrapConfig,
    ) -> Result<Vec<String>, BootstrapWorkspaceError> {
        let requested = match &self.config.packages {
            Some(packages) if !packages.is_empty() => packages.clone(),
            _ => bootstrap_config.package_names(),
        };

        if requested.is_empty() {
            return Err(BootstrapWorkspaceError::NoRepositories);
        }

        let mut seen = HashSet::new();
        let mut ordered = Vec::with_capacity(requested.len());
        for name in requested {
            if !bootstrap_config.contains(&name) {
                return Err(BootstrapWorkspaceError::UnknownRepository(name));
            }
            if seen.insert(name.clone()) {
                ordered.push(name);
            }
        }

        Ok(ordered)
    }

    /// 1レベル分を並列に解決する（結果は入力順）
    async fn resolve_level(
        &self,
        level: &[RepositoryDescriptor],
        options: &RunOptions,
        semaphore: &Semaphore,
        processed: &SharedProcessedSet,
    ) -> Vec<ExecutionResult> {
        let futures = level.iter().map(|descriptor| async move {
            // The semaphore is never closed, so acquire cannot fail.
            let _permit = semaphore.acquire().await.ok();
            let result = self.resolver.resolve(descriptor, options).await;

            if result.is_success() && !processed.claim(&descriptor.package_name) {
                debug!(package = %descriptor.package_name, "already marked as processed");
            }
            result
        });

        futures::future::join_all(futures).await
    }

    /// 発見された依存パッケージ名から次に解決するパッケージを選ぶ
    ///
    /// ProcessedSetに含まれる名前は存在確認も行わずにスキップする。
    fn next_level(
        discovered: BTreeSet<String>,
        bootstrap_config: &BootstrapConfig,
        processed: &SharedProcessedSet,
        scheduled: &HashSet<String>,
        configuration_gaps: &mut BTreeSet<String>,
    ) -> Vec<String> {
        discovered
            .into_iter()
            .filter(|name| {
                if processed.seen(name) || scheduled.contains(name) {
                    return false;
                }
                if !bootstrap_config.contains(name) {
                    if configuration_gaps.insert(name.clone()) {
                        warn!(package = %name, "dependency has no repository configuration");
                    }
                    return false;
                }
                true
            })
            .collect()
    }
}
