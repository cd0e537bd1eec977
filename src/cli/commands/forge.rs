//! Forge command implementation.
//!
//! The `specforge forge` command validates one document and, when it has
//! no errors, writes its canonical artifact to stdout or a file.

use std::fs;

use crate::cli::args::ForgeArgs;
use crate::error::{Result, SpecForgeError};
use crate::lint::{DocumentDiagnostics, HumanFormatter, LintFormatter};
use crate::pipeline::Pipeline;
use crate::render::{render_yaml, Artifact};
use crate::settings::ForgeSettings;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The forge command implementation.
pub struct ForgeCommand {
    settings: ForgeSettings,
    args: ForgeArgs,
}

impl ForgeCommand {
    /// Create a new forge command.
    pub fn new(settings: ForgeSettings, args: ForgeArgs) -> Self {
        Self { settings, args }
    }
}

impl Command for ForgeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let pipeline = Pipeline::new(self.settings.clone());
        let forged = match pipeline.forge_file(&self.args.input) {
            Ok(forged) => forged,
            Err(
                e @ (SpecForgeError::DocumentNotFound { .. }
                | SpecForgeError::DocumentParseError { .. }
                | SpecForgeError::Schema(_)),
            ) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        // Diagnostics always go to stderr, warnings included.
        if !forged.report.diagnostics().is_empty() {
            let document = DocumentDiagnostics {
                source: self.args.input.display().to_string(),
                diagnostics: forged.report.diagnostics(),
                failure: None,
            };
            let mut buf = Vec::new();
            HumanFormatter::new(ui.use_colors()).format(&[document], &mut buf)?;
            ui.report(&String::from_utf8_lossy(&buf));
        }

        let Some(artifact) = forged.artifact else {
            ui.error(&format!(
                "{} has {} error(s); no artifact written",
                self.args.input.display(),
                forged.report.error_count()
            ));
            return Ok(CommandResult::failure(1));
        };

        let warnings = forged.report.warning_count();
        if warnings > 0 {
            ui.warning(&format!("Rendered with {} warning(s)", warnings));
        }

        let output = if self.args.format == "yaml" {
            Artifact::new(render_yaml(&forged.document)?)
        } else {
            artifact
        };

        match &self.args.output {
            Some(path) => {
                fs::write(path, &output.text)?;
                ui.success(&format!(
                    "Wrote {} (sha256 {})",
                    path.display(),
                    &output.digest[..12]
                ));
            }
            None => ui.emit(&output.text),
        }

        Ok(CommandResult::success())
    }
}
