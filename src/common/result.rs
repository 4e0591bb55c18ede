use crate::common::error::RepobootError;

/// repobootプロジェクト全体で使用するResult型のエイリアス
///
/// このエイリアスにより、プロジェクト全体で一貫したエラーハンドリングが可能になる。
///
/// # Examples
///
/// ```
/// use repoboot::common::result::RepobootResult;
/// use repoboot::common::error::RepobootError;
///
/// fn example_function() -> RepobootResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> RepobootResult<()> {
///     Err(RepobootError::config_error("Something went wrong", None))
/// }
/// ```
pub type RepobootResult<T> = Result<T, RepobootError>;

/// Optionのエラー変換ヘルパー
pub trait OptionExt<T> {
    /// OptionをRepobootResultに変換する
    fn ok_or_repoboot(self, error: RepobootError) -> RepobootResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_repoboot(self, error: RepobootError) -> RepobootResult<T> {
        self.ok_or(error)
    }
}

/// Resultのエラー変換ヘルパー
pub trait ResultExt<T, E> {
    /// ファイルシステムエラーとしてRepobootResultに変換
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> RepobootResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> RepobootResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| {
            let io_error = e.into();
            RepobootError::filesystem_error_with_source(message, path, io_error)
        })
    }
}
