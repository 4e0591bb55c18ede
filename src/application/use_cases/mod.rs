pub mod bootstrap_repository;
pub mod bootstrap_workspace;

pub use bootstrap_repository::{BootstrapRequest, BootstrapResolver};
pub use bootstrap_workspace::{
    BootstrapReport, BootstrapWorkspaceConfig, BootstrapWorkspaceError, BootstrapWorkspaceUseCase,
    RepositoryOutcome,
};
