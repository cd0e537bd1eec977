//! Conformance vector well-formedness.
//!
//! Every conformance test vector must carry both an `input` and an
//! `output` key. Empty values are allowed.

use crate::lint::rule::DiagnosticKind;
use crate::lint::validator::ValidationContext;
use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};

/// Detects conformance vectors missing their input or output.
pub struct ConformanceVectorRule;

impl LintRule for ConformanceVectorRule {
    fn id(&self) -> RuleId {
        RuleId::new("R8")
    }

    fn name(&self) -> &str {
        "Conformance Vectors"
    }

    fn description(&self) -> &str {
        "Conformance test vectors must declare both input and output"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for suite in &ctx.doc.testing.conformance_tests {
            for vector in &suite.test_vectors {
                let missing: Vec<&str> = [("input", &vector.input), ("output", &vector.output)]
                    .into_iter()
                    .filter(|(_, value)| value.is_none())
                    .map(|(key, _)| key)
                    .collect();
                if missing.is_empty() {
                    continue;
                }
                diagnostics.push(
                    LintDiagnostic::new(
                        self.id(),
                        DiagnosticKind::MalformedVector,
                        self.default_severity(),
                        &vector.path,
                        format!(
                            "Test vector for '{}' is missing {}",
                            suite.standard,
                            missing
                                .iter()
                                .map(|k| format!("'{}'", k))
                                .collect::<Vec<_>>()
                                .join(" and ")
                        ),
                    )
                    .with_suggestion("Use an empty string for an empty input or output"),
                );
            }
        }

        diagnostics
    }
}
