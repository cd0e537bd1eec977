//! Lint rule definitions.
//!
//! This module provides the core traits and types for defining lint rules:
//!
//! - [`LintRule`] - The trait that all lint rules must implement
//! - [`RuleId`] - Unique identifier for a lint rule (`R1` … `R8` for builtins)
//! - [`Severity`] - Severity level for diagnostics (Warning, Error)
//! - [`DiagnosticKind`] - The specific finding a rule reports

use super::diagnostic::LintDiagnostic;
use super::validator::ValidationContext;

/// Unique identifier for a lint rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub String);

impl RuleId {
    /// Create a new rule ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity level for lint diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Advisory finding; never blocks rendering.
    Warning,
    /// Consistency violation; blocks rendering.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// The specific finding carried by a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    UndeclaredRegister,
    UndeclaredStructure,
    UndeclaredErrorType,
    UnusedErrorType,
    UnresolvedConstant,
    AlignmentMismatch,
    DuplicateIdentifier,
    UntestedEdgeCase,
    MalformedVector,
}

impl DiagnosticKind {
    /// Stable kebab-case name, used in machine-readable output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UndeclaredRegister => "undeclared-register",
            DiagnosticKind::UndeclaredStructure => "undeclared-structure",
            DiagnosticKind::UndeclaredErrorType => "undeclared-error-type",
            DiagnosticKind::UnusedErrorType => "unused-error-type",
            DiagnosticKind::UnresolvedConstant => "unresolved-constant",
            DiagnosticKind::AlignmentMismatch => "alignment-mismatch",
            DiagnosticKind::DuplicateIdentifier => "duplicate-identifier",
            DiagnosticKind::UntestedEdgeCase => "untested-edge-case",
            DiagnosticKind::MalformedVector => "malformed-vector",
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lint rule that validates a normalized document.
///
/// Rules only read the shared [`ValidationContext`] and return their own
/// findings, so any number of them can run concurrently.
pub trait LintRule: Send + Sync {
    /// Unique identifier for this rule.
    fn id(&self) -> RuleId;

    /// Human-readable name of the rule.
    fn name(&self) -> &str;

    /// Description of what this rule checks.
    fn description(&self) -> &str;

    /// Default severity for this rule.
    fn default_severity(&self) -> Severity;

    /// Check the document and return any diagnostics, in discovery order.
    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<LintDiagnostic>;
}
