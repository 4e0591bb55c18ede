pub mod config_store;
pub mod manifest_reader;
pub mod repository_state;
