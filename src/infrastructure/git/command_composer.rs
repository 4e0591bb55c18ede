use std::fmt;
use std::path::Path;

/// Separator that skips the remaining steps once one of them fails.
pub const COMMAND_SEPARATOR: &str = " && ";

/// The clone / cd / checkout sequence for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneCommand {
    clone: String,
    change_directory: String,
    checkout: String,
}

impl CloneCommand {
    /// Compose the sequence. Pure and deterministic: identical inputs give a byte-identical command.
    pub fn new(remote_url: &str, branch: &str, local_path: &Path) -> Self {
        let local_path = local_path.display();
        Self {
            clone: format!("git clone --progress \"{}\" \"{}\"", remote_url, local_path),
            change_directory: format!("cd \"{}\"", local_path),
            checkout: format!("git checkout --quiet {}", branch),
        }
    }

    /// The three steps in execution order
    pub fn parts(&self) -> [&str; 3] {
        [
            self.clone.as_str(),
            self.change_directory.as_str(),
            self.checkout.as_str(),
        ]
    }

    /// Single shell invocation running all steps
    pub fn to_shell_string(&self) -> String {
        self.parts().join(COMMAND_SEPARATOR)
    }
}

impl fmt::Display for CloneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_string())
    }
}
