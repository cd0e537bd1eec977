//! JSON output formatter.
//!
//! Formats lint diagnostics as machine-readable JSON for tooling integration.

use super::{DocumentDiagnostics, LintFormatter};
use crate::lint::LintDiagnostic;
use serde::Serialize;
use std::io::Write;

/// Formats lint output as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    valid: bool,
    documents: Vec<JsonDocument>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDocument {
    source: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<String>,
    diagnostics: Vec<JsonDiagnostic>,
}

#[derive(Serialize)]
struct JsonDiagnostic {
    rule_id: String,
    kind: &'static str,
    severity: String,
    path: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    related: Vec<JsonRelated>,
}

#[derive(Serialize)]
struct JsonRelated {
    path: String,
    message: String,
}

#[derive(Serialize)]
struct JsonSummary {
    documents: usize,
    failures: usize,
    errors: usize,
    warnings: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }

    fn diagnostic(d: &LintDiagnostic) -> JsonDiagnostic {
        JsonDiagnostic {
            rule_id: d.rule_id.0.clone(),
            kind: d.kind.as_str(),
            severity: d.severity.to_string(),
            path: d.path.clone(),
            message: d.message.clone(),
            suggestion: d.suggestion.clone(),
            related: d
                .related
                .iter()
                .map(|r| JsonRelated {
                    path: r.path.clone(),
                    message: r.message.clone(),
                })
                .collect(),
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LintFormatter for JsonFormatter {
    fn format<W: Write>(
        &self,
        documents: &[DocumentDiagnostics<'_>],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let json_documents: Vec<_> = documents
            .iter()
            .map(|doc| JsonDocument {
                source: doc.source.clone(),
                valid: doc.is_valid(),
                failure: doc.failure.clone(),
                diagnostics: doc.diagnostics.iter().map(Self::diagnostic).collect(),
            })
            .collect();

        let summary = JsonSummary {
            documents: documents.len(),
            failures: documents.iter().filter(|d| d.failure.is_some()).count(),
            errors: documents
                .iter()
                .map(|d| d.error_count() - usize::from(d.failure.is_some()))
                .sum(),
            warnings: documents.iter().map(|d| d.warning_count()).sum(),
        };

        let output = JsonOutput {
            valid: documents.iter().all(|d| d.is_valid()),
            documents: json_documents,
            summary,
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)?;

        Ok(())
    }
}
