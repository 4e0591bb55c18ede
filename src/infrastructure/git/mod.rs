pub mod command_composer;

pub use command_composer::CloneCommand;
