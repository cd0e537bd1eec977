//! Error type consistency.
//!
//! Error types named in steps or edge cases must be declared, and every
//! declared error type should be referenced somewhere it could be raised
//! or handled.

use crate::lint::references::{Domain, ProseOrigin};
use crate::lint::rule::DiagnosticKind;
use crate::lint::validator::ValidationContext;
use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};

/// Checks error types against the error handling section.
pub struct ErrorTypeConsistencyRule;

fn raises(origin: ProseOrigin) -> bool {
    matches!(origin, ProseOrigin::Step | ProseOrigin::EdgeCase)
}

fn uses(origin: ProseOrigin) -> bool {
    matches!(
        origin,
        ProseOrigin::Step
            | ProseOrigin::EdgeCase
            | ProseOrigin::ImplementationRequirement
            | ProseOrigin::ErrorStrategy
            | ProseOrigin::SyscallRequirement
    )
}

impl LintRule for ErrorTypeConsistencyRule {
    fn id(&self) -> RuleId {
        RuleId::new("R3")
    }

    fn name(&self) -> &str {
        "Error Type Consistency"
    }

    fn description(&self) -> &str {
        "Referenced error types must be declared; declared error types should be used"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<LintDiagnostic> {
        let mut diagnostics: Vec<LintDiagnostic> = ctx
            .references
            .in_domain(Domain::ErrorType)
            .filter(|r| !r.declared && raises(r.origin))
            .map(|r| {
                LintDiagnostic::new(
                    self.id(),
                    DiagnosticKind::UndeclaredErrorType,
                    self.default_severity(),
                    &r.path,
                    format!("Error type '{}' is not declared", r.identifier),
                )
                .with_suggestion(format!(
                    "Add '{}' to error_handling.error_types",
                    r.identifier
                ))
            })
            .collect();

        for error_type in &ctx.doc.error_handling.error_types {
            let used = ctx
                .references
                .mentions(Domain::ErrorType, &error_type.name)
                .any(|r| uses(r.origin));
            if !used {
                diagnostics.push(
                    LintDiagnostic::new(
                        self.id(),
                        DiagnosticKind::UnusedErrorType,
                        Severity::Warning,
                        &error_type.path,
                        format!("Error type '{}' is never referenced", error_type.name),
                    )
                    .with_suggestion(
                        "Mention it in an edge case or step, or remove the declaration",
                    ),
                );
            }
        }

        diagnostics
    }
}
