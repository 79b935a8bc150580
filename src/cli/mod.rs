pub mod commands;
pub mod interactive;

pub use commands::{Cli, Commands, RubricArgs};
