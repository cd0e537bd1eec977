//! Duplicate identifier detection.
//!
//! Names must be unique within registers, structures, algorithms, error
//! types and benchmarks. Each repeat is reported once, citing the first
//! declaration.

use std::collections::HashMap;

use crate::lint::rule::DiagnosticKind;
use crate::lint::validator::ValidationContext;
use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};

/// Detects repeated names within a declaration collection.
pub struct DuplicateIdentifierRule;

impl DuplicateIdentifierRule {
    fn scan<'a>(
        &self,
        kind: &str,
        entries: impl Iterator<Item = (String, &'a str, &'a str)>,
        diagnostics: &mut Vec<LintDiagnostic>,
    ) {
        let mut first_seen: HashMap<String, &'a str> = HashMap::new();
        for (key, name, path) in entries {
            match first_seen.get(&key).copied() {
                Some(first) => diagnostics.push(
                    LintDiagnostic::new(
                        self.id(),
                        DiagnosticKind::DuplicateIdentifier,
                        self.default_severity(),
                        path,
                        format!(
                            "Duplicate {} '{}' (first declared at {})",
                            kind, name, first
                        ),
                    )
                    .with_related(first, "first declared here")
                    .with_suggestion(format!("Rename or remove the second '{}'", name)),
                ),
                None => {
                    first_seen.insert(key, path);
                }
            }
        }
    }
}

impl LintRule for DuplicateIdentifierRule {
    fn id(&self) -> RuleId {
        RuleId::new("R6")
    }

    fn name(&self) -> &str {
        "Duplicate Identifiers"
    }

    fn description(&self) -> &str {
        "Names must be unique within each declaration collection"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<LintDiagnostic> {
        let doc = ctx.doc;
        let mut diagnostics = Vec::new();

        self.scan(
            "register",
            doc.registers
                .iter()
                .map(|r| (r.name.to_ascii_lowercase(), r.name.as_str(), r.path.as_str())),
            &mut diagnostics,
        );
        self.scan(
            "structure",
            doc.structures
                .iter()
                .map(|s| (s.name.clone(), s.name.as_str(), s.path.as_str())),
            &mut diagnostics,
        );
        self.scan(
            "algorithm",
            doc.algorithms
                .iter()
                .map(|a| (a.name.clone(), a.name.as_str(), a.path.as_str())),
            &mut diagnostics,
        );
        self.scan(
            "error type",
            doc.error_handling
                .error_types
                .iter()
                .map(|e| (e.name.clone(), e.name.as_str(), e.path.as_str())),
            &mut diagnostics,
        );
        self.scan(
            "benchmark",
            doc.performance
                .benchmarks
                .iter()
                .map(|b| (b.name.clone(), b.name.as_str(), b.path.as_str())),
            &mut diagnostics,
        );

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::validator::testing::doc;
    use crate::settings::ForgeSettings;

    fn check(yaml: &str) -> Vec<LintDiagnostic> {
        let d = doc(yaml);
        let settings = ForgeSettings::default();
        DuplicateIdentifierRule.check(&ValidationContext::new(&d, &settings))
    }

    #[test]
    fn duplicate_structure_cites_both_locations() {
        let diagnostics = check(
            r#"
metadata: {name: t, version: "1"}
structures:
  - name: DataBuffer
  - name: DataBuffer
"#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].path, "structures[1]");
        assert_eq!(diagnostics[0].related[0].path, "structures[0]");
        assert!(diagnostics[0].message.contains("structures[0]"));
    }

    #[test]
    fn each_later_occurrence_is_reported() {
        let diagnostics = check(
            r#"
metadata: {name: t, version: "1"}
algorithms: [encode, encode, encode]
"#,
        );

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics
            .iter()
            .all(|d| d.related[0].path == "algorithms[0]"));
    }

    #[test]
    fn register_duplicates_ignore_case() {
        let diagnostics = check(
            r#"
metadata: {name: t, version: "1"}
register_usage:
  general_purpose:
    - {name: rax}
    - {name: RAX}
"#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].path, "register_usage.general_purpose[1]");
    }

    #[test]
    fn same_name_in_different_collections_is_fine() {
        let diagnostics = check(
            r#"
metadata: {name: t, version: "1"}
algorithms: [encode]
performance:
  benchmarks:
    - {name: encode, input_size: 1MB}
"#,
        );

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn duplicate_error_types_and_benchmarks() {
        let diagnostics = check(
            r#"
metadata: {name: t, version: "1"}
error_handling:
  error_types: [io_error, io_error]
performance:
  benchmarks:
    - {name: small}
    - {name: small}
"#,
        );

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].message.starts_with("Duplicate error type"));
        assert!(diagnostics[1].message.starts_with("Duplicate benchmark"));
    }
}
