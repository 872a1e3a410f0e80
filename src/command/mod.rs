mod commands;
mod script;

use crate::error::EditError;

pub use commands::{Command, CommandOutcome};
pub use script::{CommandError, DrawCommand, LineError, ParsedScript, parse_line, parse_script};

/// Result type for command operations
pub type CommandResult = Result<CommandOutcome, EditError>;
