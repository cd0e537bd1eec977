//! Alignment sanity.
//!
//! Region alignment must be a power of two and the resolved size must be a
//! multiple of it.

use crate::document::path::child;
use crate::document::RegionSize;
use crate::lint::rule::DiagnosticKind;
use crate::lint::validator::ValidationContext;
use crate::lint::{LintDiagnostic, LintRule, RuleId, Severity};

/// Checks BSS region alignment against region size.
pub struct AlignmentRule;

impl LintRule for AlignmentRule {
    fn id(&self) -> RuleId {
        RuleId::new("R5")
    }

    fn name(&self) -> &str {
        "Alignment Sanity"
    }

    fn description(&self) -> &str {
        "Alignment must be a power of two that divides the region size"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for region in &ctx.doc.section_requirements.bss {
            let Some(align) = region.align else {
                continue;
            };

            if !align.is_power_of_two() {
                diagnostics.push(LintDiagnostic::new(
                    self.id(),
                    DiagnosticKind::AlignmentMismatch,
                    self.default_severity(),
                    child(&region.path, "align"),
                    format!(
                        "Alignment {} of region '{}' is not a power of two",
                        align, region.name
                    ),
                ));
                continue;
            }
            if align == 1 {
                continue;
            }

            // Unresolved sizes are reported by constant resolution.
            let size = match &region.size {
                RegionSize::Literal(n) => Some(*n),
                RegionSize::Symbol(name) => ctx.symbols.constants().resolve(name),
            };
            if let Some(size) = size {
                if size % align != 0 {
                    diagnostics.push(
                        LintDiagnostic::new(
                            self.id(),
                            DiagnosticKind::AlignmentMismatch,
                            self.default_severity(),
                            child(&region.path, "size"),
                            format!(
                                "Size {} of region '{}' is not a multiple of its alignment {}",
                                size, region.name, align
                            ),
                        )
                        .with_suggestion(format!(
                            "Round the size up to {}",
                            size.div_ceil(align) * align
                        )),
                    );
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::validator::testing::doc;
    use crate::settings::ForgeSettings;

    fn check(bss: &str) -> Vec<LintDiagnostic> {
        let yaml = format!(
            r#"
metadata: {{name: t, version: "1"}}
header_format:
  directives: ["BUF_SIZE equ 4096", "ODD equ 4095"]
section_requirements:
  bss:
{}
"#,
            bss
        );
        let d = doc(&yaml);
        let settings = ForgeSettings::default();
        AlignmentRule.check(&ValidationContext::new(&d, &settings))
    }

    #[test]
    fn aligned_symbolic_size_passes() {
        assert!(check("    - {name: buf, size: BUF_SIZE, align: 64}").is_empty());
    }

    #[test]
    fn non_power_of_two_alignment() {
        let diagnostics = check("    - {name: buf, size: 48, align: 12}");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].path, "section_requirements.bss[0].align");
        assert!(diagnostics[0].message.contains("power of two"));
    }

    #[test]
    fn zero_alignment_is_rejected() {
        assert_eq!(check("    - {name: buf, size: 48, align: 0}").len(), 1);
    }

    #[test]
    fn size_not_multiple_of_alignment() {
        let diagnostics = check("    - {name: buf, size: ODD, align: 16}");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::AlignmentMismatch);
        assert_eq!(diagnostics[0].path, "section_requirements.bss[0].size");
        assert_eq!(diagnostics[0].suggestion.as_deref(), Some("Round the size up to 4096"));
    }

    #[test]
    fn alignment_of_one_always_passes() {
        assert!(check("    - {name: buf, size: 7, align: 1}").is_empty());
    }

    #[test]
    fn unresolved_size_is_left_to_constant_resolution() {
        assert!(check("    - {name: buf, size: MISSING, align: 8}").is_empty());
    }

    #[test]
    fn missing_alignment_passes() {
        assert!(check("    - {name: buf, size: 3}").is_empty());
    }
}
