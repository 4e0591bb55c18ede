use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::debug;

/// Shell execution failure.
///
/// `message` is the one-line summary; `diagnostics` carries any further lines
/// (typically the captured stderr of the failed command).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ShellError {
    pub message: String,
    pub diagnostics: Vec<String>,
    pub exit_code: Option<i32>,
}

impl ShellError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            diagnostics: Vec::new(),
            exit_code: None,
        }
    }

    pub fn with_diagnostics<I, S>(mut self, diagnostics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diagnostics.extend(diagnostics.into_iter().map(Into::into));
        self
    }

    /// Non-zero exit; stderr lines become diagnostics
    pub fn command_failed(command: &str, exit_code: Option<i32>, stderr: &str) -> Self {
        let diagnostics = stderr
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_string);
        Self {
            exit_code,
            ..Self::new(format!("Command failed: {}", command)).with_diagnostics(diagnostics)
        }
    }

    pub fn spawn_failed(command: &str, source: &std::io::Error) -> Self {
        Self::new(format!("Failed to spawn '{}': {}", command, source))
    }

    pub fn timed_out(command: &str, timeout_seconds: u64) -> Self {
        Self::new(format!(
            "Command timed out after {} seconds: {}",
            timeout_seconds, command
        ))
    }

    pub fn invalid_command(reason: impl Into<String>) -> Self {
        Self::new(format!("Invalid command: {}", reason.into()))
    }
}

/// Runs one composed shell command and returns its captured stdout
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShellExecutor: Send + Sync {
    async fn execute(&self, command: &str) -> Result<String, ShellError>;
}

/// Configuration for [`SystemShellExecutor`]
#[derive(Debug, Clone, Default)]
pub struct ShellConfig {
    /// Working directory for command execution
    pub working_directory: Option<PathBuf>,

    /// Environment variables to set for the process
    pub environment_variables: HashMap<String, String>,

    /// Timeout for command execution in seconds
    pub timeout_seconds: Option<u64>,
}

impl ShellConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_working_directory<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_directory = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_environment_variable(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment_variables.insert(key.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }
}

/// Executes commands through the platform shell (`sh -c`, or `cmd /C` on Windows)
#[derive(Debug, Clone, Default)]
pub struct SystemShellExecutor {
    config: ShellConfig,
}

impl SystemShellExecutor {
    pub fn new(config: ShellConfig) -> Self {
        Self { config }
    }

    fn shell() -> (&'static str, &'static str) {
        if cfg!(target_os = "windows") {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        }
    }

    fn build_command(&self, command: &str) -> TokioCommand {
        let (shell, flag) = Self::shell();
        let mut cmd = TokioCommand::new(shell);
        cmd.arg(flag).arg(command);

        if let Some(working_dir) = &self.config.working_directory {
            cmd.current_dir(working_dir);
        }
        for (key, value) in &self.config.environment_variables {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl ShellExecutor for SystemShellExecutor {
    async fn execute(&self, command: &str) -> Result<String, ShellError> {
        if command.trim().is_empty() {
            return Err(ShellError::invalid_command("Command is empty"));
        }

        let start_time = Instant::now();
        let child = self
            .build_command(command)
            .spawn()
            .map_err(|e| ShellError::spawn_failed(command, &e))?;

        let output = match self.config.timeout_seconds {
            Some(timeout_secs) => {
                match timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await {
                    Ok(output) => output,
                    Err(_) => return Err(ShellError::timed_out(command, timeout_secs)),
                }
            }
            None => child.wait_with_output().await,
        }
        .map_err(|e| ShellError::new(format!("Failed to wait for '{}': {}", command, e)))?;

        debug!(
            command,
            exit_code = ?output.status.code(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "shell command finished"
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ShellError::command_failed(
                command,
                output.status.code(),
                &stderr,
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
