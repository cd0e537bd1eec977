//! Human-readable output formatter.
//!
//! Formats lint diagnostics for terminal display with optional color support.

use console::Style;

use super::{DocumentDiagnostics, LintFormatter};
use crate::lint::Severity;
use std::io::Write;

/// Formats lint output for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.use_color {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn severity_prefix(&self, severity: Severity) -> String {
        match severity {
            Severity::Warning => self.paint(Style::new().yellow().bold(), "warning"),
            Severity::Error => self.paint(Style::new().red().bold(), "error"),
        }
    }
}

impl LintFormatter for HumanFormatter {
    fn format<W: Write>(
        &self,
        documents: &[DocumentDiagnostics<'_>],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let arrow = self.paint(Style::new().blue().bold(), "-->");
        let mut error_count = 0;
        let mut warning_count = 0;

        for doc in documents {
            error_count += doc.error_count();
            warning_count += doc.warning_count();

            if let Some(ref failure) = doc.failure {
                writeln!(writer, "{}: {}", self.severity_prefix(Severity::Error), failure)?;
                writeln!(writer, "  {} {}", arrow, doc.source)?;
                writeln!(writer)?;
                continue;
            }

            for diag in doc.diagnostics {
                // Header line: error[R1]: message
                writeln!(
                    writer,
                    "{}[{}]: {}",
                    self.severity_prefix(diag.severity),
                    diag.rule_id.0,
                    diag.message
                )?;

                // Location line
                writeln!(writer, "  {} {}: {}", arrow, doc.source, diag.path)?;

                // Suggestion
                if let Some(ref suggestion) = diag.suggestion {
                    writeln!(writer, "   = help: {}", suggestion)?;
                }

                // Related info
                for related in &diag.related {
                    writeln!(writer, "   = note: {} ({})", related.message, related.path)?;
                }

                writeln!(writer)?;
            }
        }

        // Summary
        if error_count > 0 || warning_count > 0 {
            writeln!(
                writer,
                "Found {} error(s) and {} warning(s)",
                error_count, warning_count
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::lint::LintDiagnostic;

    fn render(diagnostics: &[LintDiagnostic]) -> String {
        let documents = [DocumentDiagnostics {
            source: "base64.yml".into(),
            diagnostics,
            failure: None,
        }];
        let mut output = Vec::new();
        HumanFormatter::new(false)
            .format(&documents, &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn formats_error_diagnostic() {
        let output = render(&[undeclared_register()]);

        assert!(output.contains("error[R1]: Register 'rbx' is used but not declared"));
        assert!(output.contains("  --> base64.yml: algorithms.encode.steps.main[0]"));
        assert!(output.contains("= help: Add 'rbx' to register_usage"));
    }

    #[test]
    fn formats_warning_diagnostic() {
        let output = render(&[untested_edge_case()]);
        assert!(output.contains("warning[R7]"));
    }

    #[test]
    fn formats_summary_line() {
        let output = render(&[
            undeclared_register(),
            duplicate_structure(),
            untested_edge_case(),
        ]);

        assert!(output.contains("Found 2 error(s) and 1 warning(s)"));
    }

    #[test]
    fn formats_related_info() {
        let output = render(&[duplicate_structure()]);
        assert!(output.contains("= note: first declared here (structures[0])"));
    }

    #[test]
    fn formats_document_failure() {
        let documents = [DocumentDiagnostics {
            source: "broken.yml".into(),
            diagnostics: &[],
            failure: Some("schema error at metadata: required section is missing".into()),
        }];
        let mut output = Vec::new();
        HumanFormatter::new(false)
            .format(&documents, &mut output)
            .unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.starts_with("error: schema error at metadata"));
        assert!(output.contains("  --> broken.yml"));
        assert!(output.contains("Found 1 error(s) and 0 warning(s)"));
    }

    #[test]
    fn colored_output_contains_escape_codes() {
        let documents = [DocumentDiagnostics {
            source: "base64.yml".into(),
            diagnostics: &[undeclared_register()],
            failure: None,
        }];
        let mut output = Vec::new();
        HumanFormatter::new(true)
            .format(&documents, &mut output)
            .unwrap();
        assert!(String::from_utf8(output).unwrap().contains('\u{1b}'));
    }

    #[test]
    fn no_summary_when_no_issues() {
        let output = render(&[]);
        assert!(!output.contains("Found"));
    }
}
