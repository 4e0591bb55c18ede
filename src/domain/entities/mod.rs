pub mod bootstrap_config;
pub mod execution_result;
pub mod processed_set;
pub mod repository;

pub use bootstrap_config::{BootstrapConfig, RepositoryEntry};
pub use execution_result::ExecutionResult;
pub use processed_set::{ProcessedSet, SharedProcessedSet};
pub use repository::RepositoryDescriptor;
