//! Constant resolution.
//!
//! A region size written as a name must be defined by a header directive
//! and evaluate to an integer.

use crate::document::path::child;
use crate::document::RegionSize;
use crate::lint::rule::DiagnosticKind;
use crate::lint::validator::ValidationContext;
use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};

/// Detects symbolic region sizes that do not resolve.
pub struct ConstantResolutionRule;

impl LintRule for ConstantResolutionRule {
    fn id(&self) -> RuleId {
        RuleId::new("R4")
    }

    fn name(&self) -> &str {
        "Constant Resolution"
    }

    fn description(&self) -> &str {
        "Symbolic region sizes must be defined by a directive and evaluate to an integer"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<LintDiagnostic> {
        let constants = ctx.symbols.constants();
        let mut diagnostics = Vec::new();

        for region in &ctx.doc.section_requirements.bss {
            let RegionSize::Symbol(name) = &region.size else {
                continue;
            };
            let size_path = child(&region.path, "size");

            match constants.get(name) {
                None => diagnostics.push(
                    LintDiagnostic::new(
                        self.id(),
                        DiagnosticKind::UnresolvedConstant,
                        self.default_severity(),
                        size_path,
                        format!(
                            "Size of region '{}' uses undefined constant '{}'",
                            region.name, name
                        ),
                    )
                    .with_suggestion(format!(
                        "Define it in header_format.directives, e.g. '{} equ 4096'",
                        name
                    )),
                ),
                Some(def) if constants.resolve(name).is_none() => diagnostics.push(
                    LintDiagnostic::new(
                        self.id(),
                        DiagnosticKind::UnresolvedConstant,
                        self.default_severity(),
                        size_path,
                        format!(
                            "Constant '{}' = '{}' does not evaluate to a non-negative integer",
                            name, def.expr
                        ),
                    )
                    .with_related(def.path.clone(), "defined here"),
                ),
                Some(_) => {}
            }
        }

        diagnostics
    }
}
