//! Lint diagnostic messages.
//!
//! This module provides the [`LintDiagnostic`] type for representing
//! issues found during document validation. Every diagnostic points at a
//! node of the source document through a dotted path.

use super::rule::{DiagnosticKind, RuleId, Severity};

/// A diagnostic message produced by a lint rule.
#[derive(Debug, Clone, PartialEq)]
pub struct LintDiagnostic {
    /// The rule that produced this diagnostic.
    pub rule_id: RuleId,
    /// What was found.
    pub kind: DiagnosticKind,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Dotted locator into the source document.
    pub path: String,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing the issue.
    pub suggestion: Option<String>,
    /// Additional related locations.
    pub related: Vec<RelatedInfo>,
}

/// Additional information related to a diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedInfo {
    /// Location of the related information.
    pub path: String,
    /// Message explaining the relationship.
    pub message: String,
}

impl LintDiagnostic {
    /// Create a new diagnostic.
    pub fn new(
        rule_id: RuleId,
        kind: DiagnosticKind,
        severity: Severity,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id,
            kind,
            severity,
            path: path.into(),
            message: message.into(),
            suggestion: None,
            related: vec![],
        }
    }

    /// Add a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add related information.
    pub fn with_related(mut self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.related.push(RelatedInfo {
            path: path.into(),
            message: message.into(),
        });
        self
    }

    /// Whether this diagnostic blocks rendering.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_creation() {
        let diag = LintDiagnostic::new(
            RuleId::new("R1"),
            DiagnosticKind::UndeclaredRegister,
            Severity::Error,
            "algorithms[0].steps.main[0]",
            "Test message",
        );

        assert_eq!(diag.rule_id, RuleId::new("R1"));
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.path, "algorithms[0].steps.main[0]");
        assert_eq!(diag.message, "Test message");
        assert!(diag.suggestion.is_none());
        assert!(diag.related.is_empty());
        assert!(diag.is_error());
    }

    #[test]
    fn diagnostic_with_suggestion() {
        let diag = LintDiagnostic::new(
            RuleId::new("R7"),
            DiagnosticKind::UntestedEdgeCase,
            Severity::Warning,
            "algorithms.encode.edge_cases[0]",
            "Test warning",
        )
        .with_suggestion("Add a unit test");

        assert_eq!(diag.suggestion.as_deref(), Some("Add a unit test"));
        assert!(!diag.is_error());
    }

    #[test]
    fn diagnostic_with_related_info() {
        let diag = LintDiagnostic::new(
            RuleId::new("R6"),
            DiagnosticKind::DuplicateIdentifier,
            Severity::Error,
            "structures[1]",
            "Duplicate structure",
        )
        .with_related("structures[0]", "first declared here");

        assert_eq!(diag.related.len(), 1);
        assert_eq!(diag.related[0].path, "structures[0]");
        assert_eq!(diag.related[0].message, "first declared here");
    }
}
