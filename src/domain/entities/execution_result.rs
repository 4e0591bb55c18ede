use std::collections::BTreeSet;

/// 1リポジトリの解決結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// クローン済み、または既に存在していた
    Resolved {
        /// 今回の実行で新たにクローンしたか
        cloned_newly: bool,

        /// 表示用の情報ログ
        info_logs: Vec<String>,

        /// マニフェストから見つかった依存パッケージ名（再帰モード時のみ）
        discovered_dependency_names: Option<BTreeSet<String>>,

        /// クローン後に発生したエラー（マニフェストが読めない場合など）
        error_logs: Vec<String>,
    },

    /// クローンに失敗した
    Failed {
        /// 表示用のエラーログ（先頭行は `Error: <message>`）
        error_logs: Vec<String>,
    },
}

impl ExecutionResult {
    /// 新規クローン成功の結果を作成
    pub fn cloned(output: impl Into<String>) -> Self {
        Self::Resolved {
            cloned_newly: true,
            info_logs: vec![output.into()],
            discovered_dependency_names: None,
            error_logs: Vec::new(),
        }
    }

    /// 既存リポジトリの結果を作成
    pub fn already_cloned(package_name: &str) -> Self {
        Self::Resolved {
            cloned_newly: false,
            info_logs: vec![format!("Package \"{}\" is already cloned.", package_name)],
            discovered_dependency_names: None,
            error_logs: Vec::new(),
        }
    }

    /// 失敗結果を作成。`message` は `Error: ` を付けて先頭行になる
    pub fn failed<I, S>(message: impl AsRef<str>, diagnostics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut error_logs = vec![format!("Error: {}", message.as_ref())];
        error_logs.extend(diagnostics.into_iter().map(Into::into));
        Self::Failed { error_logs }
    }

    /// 発見した依存パッケージ名を設定（失敗結果には影響しない）
    pub fn with_discovered_dependency_names(mut self, names: BTreeSet<String>) -> Self {
        if let Self::Resolved {
            discovered_dependency_names,
            ..
        } = &mut self
        {
            *discovered_dependency_names = Some(names);
        }
        self
    }

    /// 依存関係を読めなかったことを記録する
    ///
    /// クローン結果は保持し、発見済みの依存パッケージ名は破棄する。失敗結果には影響しない。
    pub fn with_manifest_error(mut self, message: impl AsRef<str>) -> Self {
        if let Self::Resolved {
            discovered_dependency_names,
            error_logs,
            ..
        } = &mut self
        {
            *discovered_dependency_names = None;
            error_logs.push(format!("Error: {}", message.as_ref()));
        }
        self
    }

    /// 解決に成功したか
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// 新たにクローンしたか
    pub fn cloned_newly(&self) -> bool {
        matches!(
            self,
            Self::Resolved {
                cloned_newly: true,
                ..
            }
        )
    }

    /// 情報ログ（失敗時は空）
    pub fn info_logs(&self) -> &[String] {
        match self {
            Self::Resolved { info_logs, .. } => info_logs,
            Self::Failed { .. } => &[],
        }
    }

    /// エラーログ
    pub fn error_logs(&self) -> &[String] {
        match self {
            Self::Resolved { error_logs, .. } | Self::Failed { error_logs } => error_logs,
        }
    }

    /// 発見した依存パッケージ名（再帰モードで成功した場合のみ）
    pub fn discovered_dependency_names(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Resolved {
                discovered_dependency_names,
                ..
            } => discovered_dependency_names.as_ref(),
            Self::Failed { .. } => None,
        }
    }
}
