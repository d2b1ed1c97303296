//! External process execution and search-path lookup.

pub mod command;
pub mod path;

pub use command::{
    execute, CommandOptions, CommandResult, CommandRunner, SystemRunner,
};
pub use path::{command_available, parse_system_path, prepend_path, resolve_tool_path};
