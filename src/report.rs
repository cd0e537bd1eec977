//! Validation reports.
//!
//! A [`Report`] holds every diagnostic produced for one document. It is
//! the gate between validation and rendering: a document with any
//! error-severity diagnostic is not valid and will not be rendered.

use crate::lint::{LintDiagnostic, Severity};

/// All findings for one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    diagnostics: Vec<LintDiagnostic>,
}

impl Report {
    pub fn new(diagnostics: Vec<LintDiagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Diagnostics grouped by rule id, in discovery order within a rule.
    pub fn diagnostics(&self) -> &[LintDiagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &LintDiagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LintDiagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Zero errors. Warnings never affect validity.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    /// Valid, and under `strict` also free of warnings.
    pub fn passes(&self, strict: bool) -> bool {
        self.is_valid() && (!strict || self.warning_count() == 0)
    }

    pub fn into_diagnostics(self) -> Vec<LintDiagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::{DiagnosticKind, RuleId};

    fn diag(severity: Severity) -> LintDiagnostic {
        LintDiagnostic::new(
            RuleId::new("R1"),
            DiagnosticKind::UndeclaredRegister,
            severity,
            "algorithms[0]",
            "msg",
        )
    }

    #[test]
    fn empty_report_is_valid() {
        let report = Report::default();
        assert!(report.is_valid());
        assert!(report.passes(true));
    }

    #[test]
    fn warnings_do_not_affect_validity() {
        let report = Report::new(vec![diag(Severity::Warning), diag(Severity::Warning)]);
        assert!(report.is_valid());
        assert_eq!(report.warning_count(), 2);
        assert!(report.passes(false));
        assert!(!report.passes(true));
    }

    #[test]
    fn any_error_makes_report_invalid() {
        let report = Report::new(vec![diag(Severity::Warning), diag(Severity::Error)]);
        assert!(!report.is_valid());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.into_diagnostics().len(), 2);
    }
}
