//! Register closure.
//!
//! Every register mentioned in algorithm or performance prose must be
//! declared in the register usage section.

use crate::lint::references::Domain;
use crate::lint::rule::DiagnosticKind;
use crate::lint::validator::ValidationContext;
use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};

/// Detects registers used in prose but never declared.
pub struct RegisterClosureRule;

impl LintRule for RegisterClosureRule {
    fn id(&self) -> RuleId {
        RuleId::new("R1")
    }

    fn name(&self) -> &str {
        "Register Closure"
    }

    fn description(&self) -> &str {
        "Registers mentioned in algorithm or performance text must be declared"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<LintDiagnostic> {
        ctx.references
            .in_domain(Domain::Register)
            .filter(|r| !r.declared && (r.origin.is_algorithm() || r.origin.is_performance()))
            .map(|r| {
                LintDiagnostic::new(
                    self.id(),
                    DiagnosticKind::UndeclaredRegister,
                    self.default_severity(),
                    &r.path,
                    format!("Register '{}' is used but not declared", r.identifier),
                )
                .with_suggestion(format!("Add '{}' to register_usage", r.identifier))
            })
            .collect()
    }
}
