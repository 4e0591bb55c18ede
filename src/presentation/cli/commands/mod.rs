pub mod bootstrap;
pub mod list;

pub use bootstrap::*;
pub use list::*;

use anyhow::Result;
use std::path::Path;

use crate::domain::entities::bootstrap_config::BootstrapConfig;
use crate::infrastructure::filesystem::config_store::ConfigStore;

/// Load the configuration from `explicit_path`, or discover it in `cwd`
pub(crate) async fn load_config(
    cwd: &Path,
    explicit_path: Option<&Path>,
) -> Result<BootstrapConfig> {
    let store = ConfigStore::new();
    let config = match explicit_path {
        Some(path) => store.load(&cwd.join(path)).await,
        None => store.load_from_directory(cwd).await,
    };

    config.map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}
