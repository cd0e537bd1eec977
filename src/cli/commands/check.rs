//! Check command implementation.
//!
//! The `specforge check` command validates a batch of documents and prints
//! one combined report.

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::lint::{
    DocumentDiagnostics, HumanFormatter, JsonFormatter, LintFormatter, RuleRegistry,
    SarifFormatter,
};
use crate::pipeline::{DocumentResult, Pipeline};
use crate::settings::ForgeSettings;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    settings: ForgeSettings,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(settings: ForgeSettings, args: CheckArgs) -> Self {
        Self { settings, args }
    }

    /// Format every document's diagnostics using the requested formatter.
    fn format_output(
        &self,
        documents: &[DocumentDiagnostics<'_>],
        color: bool,
    ) -> Result<String> {
        let mut output = Vec::new();

        match self.args.format.as_str() {
            "json" => JsonFormatter::new().format(documents, &mut output)?,
            "sarif" => SarifFormatter::new("specforge", env!("CARGO_PKG_VERSION"))
                .with_rules(&RuleRegistry::with_builtins())
                .format(documents, &mut output)?,
            _ => HumanFormatter::new(color).format(documents, &mut output)?,
        }

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let pipeline = Pipeline::new(self.settings.clone());
        ui.message(&format!("Checking {} document(s)", self.args.inputs.len()));
        let results: Vec<DocumentResult> = pipeline.check_batch(&self.args.inputs)?;
        let documents: Vec<DocumentDiagnostics<'_>> =
            results.iter().map(DocumentResult::diagnostics).collect();

        let failed = results
            .iter()
            .filter(|r| !r.passes(self.args.strict))
            .count();
        let clean = documents
            .iter()
            .all(|d| d.failure.is_none() && d.diagnostics.is_empty());

        if self.args.format == "human" && clean {
            ui.success(&format!("{} document(s) valid", documents.len()));
        } else {
            let output = self.format_output(&documents, ui.use_colors())?;
            ui.emit(&output);
        }

        if failed > 0 {
            ui.error(&format!(
                "{} of {} document(s) failed",
                failed,
                documents.len()
            ));
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
