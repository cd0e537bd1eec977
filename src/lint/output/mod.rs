//! Lint output formatters.
//!
//! This module provides formatters for outputting lint diagnostics
//! in different formats (human-readable, JSON, SARIF). Formatters work on
//! a batch of documents so a single run over many inputs produces one
//! coherent report.

pub mod human;
pub mod json;
pub mod sarif;

use crate::lint::{LintDiagnostic, Severity};
use std::io::Write;

/// Output format for lint results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
    Sarif,
}

/// Diagnostics of one input document.
#[derive(Debug, Clone)]
pub struct DocumentDiagnostics<'a> {
    /// Display name of the input, usually its path.
    pub source: String,
    pub diagnostics: &'a [LintDiagnostic],
    /// Set when the document could not be loaded or normalized.
    pub failure: Option<String>,
}

impl DocumentDiagnostics<'_> {
    pub fn error_count(&self) -> usize {
        let failed = usize::from(self.failure.is_some());
        failed
            + self
                .diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Error)
                .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// No load failure and no error diagnostics.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }
}

/// Trait for formatting lint output.
pub trait LintFormatter {
    /// Format the diagnostics of every document to the given writer.
    fn format<W: Write>(
        &self,
        documents: &[DocumentDiagnostics<'_>],
        writer: &mut W,
    ) -> std::io::Result<()>;
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
pub use sarif::SarifFormatter;
