//! Structure closure.
//!
//! Structure names mentioned in algorithm or section requirement prose
//! must be declared in the data structures section.

use crate::lint::references::Domain;
use crate::lint::rule::DiagnosticKind;
use crate::lint::validator::ValidationContext;
use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};

/// Detects structures referenced in prose but never declared.
pub struct StructureClosureRule;

impl LintRule for StructureClosureRule {
    fn id(&self) -> RuleId {
        RuleId::new("R2")
    }

    fn name(&self) -> &str {
        "Structure Closure"
    }

    fn description(&self) -> &str {
        "Structures mentioned in algorithm or section text must be declared"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<LintDiagnostic> {
        ctx.references
            .in_domain(Domain::Structure)
            .filter(|r| !r.declared && (r.origin.is_algorithm() || r.origin.is_section()))
            .map(|r| {
                LintDiagnostic::new(
                    self.id(),
                    DiagnosticKind::UndeclaredStructure,
                    self.default_severity(),
                    &r.path,
                    format!("Structure '{}' is referenced but not declared", r.identifier),
                )
                .with_suggestion(format!(
                    "Declare '{}' under structures, or list it in known_identifiers",
                    r.identifier
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::validator::testing::doc;
    use crate::settings::ForgeSettings;

    fn check_with(yaml: &str, settings: &ForgeSettings) -> Vec<LintDiagnostic> {
        let d = doc(yaml);
        StructureClosureRule.check(&ValidationContext::new(&d, settings))
    }

    fn check(yaml: &str) -> Vec<LintDiagnostic> {
        check_with(yaml, &ForgeSettings::default())
    }

    #[test]
    fn detects_undeclared_structure_in_steps() {
        let diagnostics = check(
            r#"
metadata: {name: t, version: "1"}
structures:
  DataBuffer: {}
algorithms:
  - name: decode
    steps:
      main_loop: [Read a block, Write it to OutputBlock]
"#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].path, "algorithms[0].steps.main_loop[1]");
        assert!(diagnostics[0].message.contains("'OutputBlock'"));
    }

    #[test]
    fn detects_undeclared_structure_in_sections() {
        let diagnostics = check(
            r#"
metadata: {name: t, version: "1"}
section_requirements:
  text:
    organization: [Keep LookupTable aligned]
"#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].path,
            "section_requirements.text.organization[0]"
        );
    }

    #[test]
    fn declared_structures_pass() {
        let diagnostics = check(
            r#"
metadata: {name: t, version: "1"}
structures:
  - name: DataBuffer
algorithms:
  - name: encode
    description: Fills the DataBuffer
"#,
        );

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn error_type_names_are_not_structures() {
        let diagnostics = check(
            r#"
metadata: {name: t, version: "1"}
algorithms:
  - name: encode
    steps: [Raise InvalidInputError on bad bytes]
"#,
        );

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn known_identifiers_are_exempt() {
        let settings = ForgeSettings {
            known_identifiers: vec!["GitHub".into()],
            ..Default::default()
        };
        let diagnostics = check_with(
            r#"
metadata: {name: t, version: "1"}
algorithms:
  - name: encode
    description: Same alphabet GitHub uses
"#,
            &settings,
        );

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_performance_prose() {
        let diagnostics = check(
            r#"
metadata: {name: t, version: "1"}
performance:
  constraints: [Prefer RingBuffer reuse]
"#,
        );

        assert!(diagnostics.is_empty());
    }
}
