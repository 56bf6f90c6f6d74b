pub mod commands;
mod core;
mod help;
mod io;
pub mod output;
mod shell;

pub use self::core::{CliError, CliMode, CommandError};
pub use shell::run_cli;
