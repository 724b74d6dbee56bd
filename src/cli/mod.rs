pub mod commands;
mod completion;
mod context;
mod help;
pub mod output;
mod registry;
mod shell;

pub use context::{CliMode, CommandError, CommandResult, ShellContext};
pub use registry::{CommandEntry, CommandHandler, CommandRegistry};
pub use shell::{run_cli, SCRIPT_ENV};
