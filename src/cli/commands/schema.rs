//! Schema command implementation.
//!
//! The `specforge schema` command prints the JSON Schema of the input
//! document format.

use crate::error::{Result, SpecForgeError};
use crate::lint::SchemaGenerator;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

impl SchemaCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SchemaCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let schema = SchemaGenerator::new().generate();
        let json =
            serde_json::to_string_pretty(&schema).map_err(|e| SpecForgeError::Other(e.into()))?;
        ui.emit(&json);
        ui.emit("\n");
        Ok(CommandResult::success())
    }
}
