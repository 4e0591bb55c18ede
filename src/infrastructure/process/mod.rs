pub mod shell_executor;

pub use shell_executor::{ShellConfig, ShellError, ShellExecutor, SystemShellExecutor};
