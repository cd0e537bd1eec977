//! Edge case test coverage.
//!
//! Each edge case should be exercised by some unit or integration test.
//! A test covers an edge case when their significant tokens overlap
//! enough; the threshold comes from settings and the finding is only ever
//! a warning.

use std::collections::BTreeSet;

use crate::document::path::{child, index};
use crate::lint::rule::DiagnosticKind;
use crate::lint::tokenize::significant_tokens;
use crate::lint::validator::ValidationContext;
use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};
use crate::settings::ForgeSettings;

/// Warns about edge cases with no matching test.
pub struct EdgeCaseCoverageRule;

/// Overlap coefficient `|a ∩ b| / min(|a|, |b|)`, with the shared count.
fn overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> (usize, f64) {
    let shared = a.intersection(b).count();
    let smaller = a.len().min(b.len());
    if smaller == 0 {
        (0, 0.0)
    } else {
        (shared, shared as f64 / smaller as f64)
    }
}

fn covers(edge: &BTreeSet<String>, test: &BTreeSet<String>, settings: &ForgeSettings) -> bool {
    let (shared, coefficient) = overlap(edge, test);
    shared >= settings.min_shared_tokens.max(1) && coefficient >= settings.edge_case_similarity
}

impl LintRule for EdgeCaseCoverageRule {
    fn id(&self) -> RuleId {
        RuleId::new("R7")
    }

    fn name(&self) -> &str {
        "Edge Case Coverage"
    }

    fn description(&self) -> &str {
        "Each edge case should have a unit or integration test that mentions it"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<LintDiagnostic> {
        let testing = &ctx.doc.testing;
        let tests: Vec<BTreeSet<String>> = testing
            .unit_tests
            .iter()
            .map(|t| {
                let mut text = t.name.clone();
                for line in &t.validation {
                    text.push(' ');
                    text.push_str(line);
                }
                significant_tokens(&text)
            })
            .chain(testing.integration_tests.iter().map(|t| {
                let mut text = t.name.clone();
                for line in t.validation.iter().chain(t.details.iter().flat_map(|c| &c.items)) {
                    text.push(' ');
                    text.push_str(line);
                }
                significant_tokens(&text)
            }))
            .collect();

        let mut diagnostics = Vec::new();
        for alg in &ctx.doc.algorithms {
            let base = child(&alg.path, "edge_cases");
            for (i, edge_case) in alg.edge_cases.iter().enumerate() {
                let edge_tokens = significant_tokens(edge_case);
                if edge_tokens.is_empty() {
                    continue;
                }
                if tests.iter().any(|t| covers(&edge_tokens, t, ctx.settings)) {
                    continue;
                }
                diagnostics.push(
                    LintDiagnostic::new(
                        self.id(),
                        DiagnosticKind::UntestedEdgeCase,
                        self.default_severity(),
                        index(&base, i),
                        format!(
                            "Edge case '{}' of algorithm '{}' has no matching test",
                            edge_case, alg.name
                        ),
                    )
                    .with_suggestion("Add a unit or integration test that names this case"),
                );
            }
        }

        diagnostics
    }
}
