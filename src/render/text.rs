//! Fixed-order text artifact.

use super::Artifact;
use crate::document::{
    find_category, Algorithm, Category, CodeStyle, ErrorHandling, HeaderFormat, Metadata,
    Performance, RegisterEntry, SectionRequirements, Structure, Testing,
};
use crate::error::{Result, SpecForgeError};
use crate::pipeline::Checked;
use crate::settings::ForgeSettings;

/// Style categories that always render, in this order, before any others.
const STYLE_CATEGORIES: [(&str, &str); 4] = [
    ("indentation", "Indentation"),
    ("comments", "Comments"),
    ("naming", "Naming"),
    ("organization", "Organization"),
];

/// Render a checked document as the canonical text artifact.
///
/// A document whose report carries any error is refused with
/// [`SpecForgeError::RenderPrecondition`].
pub fn render_text(checked: &Checked, settings: &ForgeSettings) -> Result<Artifact> {
    let report = checked.report();
    if !report.is_valid() {
        return Err(SpecForgeError::RenderPrecondition {
            errors: report.error_count(),
        });
    }

    let doc = checked.document();

    let mut out = TextWriter::new(&settings.border_marker);
    metadata(&mut out, &doc.metadata);
    header_format(&mut out, &doc.header_format);
    registers(&mut out, &doc.registers);
    structures(&mut out, &doc.structures);
    algorithms(&mut out, &doc.algorithms);
    error_handling(&mut out, &doc.error_handling);
    section_requirements(&mut out, &doc.section_requirements);
    performance(&mut out, &doc.performance);
    testing(&mut out, &doc.testing);
    code_style(&mut out, &doc.code_style);

    let artifact = Artifact::new(out.finish());
    tracing::debug!(
        document = %doc.metadata.name,
        bytes = artifact.text.len(),
        digest = %artifact.digest,
        "Rendered text artifact"
    );
    Ok(artifact)
}

struct TextWriter<'m> {
    marker: &'m str,
    lines: Vec<String>,
}

impl<'m> TextWriter<'m> {
    fn new(marker: &'m str) -> Self {
        Self {
            marker,
            lines: Vec::new(),
        }
    }

    fn section(&mut self, title: &str) {
        let marker = self.marker;
        self.line(format!("{marker} {title} {marker}"));
    }

    /// Continuation lines of multi-line text are indented two columns past
    /// the first line, so they can never read as a section border or a
    /// top-level label.
    fn line(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.contains('\n') {
            self.lines.push(text);
            return;
        }
        let depth = text.len() - text.trim_start().len() + 2;
        let text = text.trim_end_matches(['\n', '\r']);
        for (i, part) in text.split('\n').enumerate() {
            let part = part.trim_end_matches('\r');
            if i == 0 {
                self.lines.push(part.to_string());
            } else if part.trim().is_empty() {
                self.lines.push(String::new());
            } else {
                self.lines.push(format!("{:depth$}{}", "", part.trim_start()));
            }
        }
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn field(&mut self, indent: usize, label: &str, value: &str) {
        if value.is_empty() {
            self.heading(indent, label);
        } else {
            self.line(format!("{:indent$}{label}: {value}", ""));
        }
    }

    fn heading(&mut self, indent: usize, label: &str) {
        self.line(format!("{:indent$}{label}:", ""));
    }

    fn items(&mut self, indent: usize, items: &[String]) {
        for item in items {
            self.line(format!("{:indent$}- {item}", ""));
        }
    }

    /// Heading plus items; always rendered.
    fn list(&mut self, indent: usize, label: &str, items: &[String]) {
        self.heading(indent, label);
        self.items(indent + 2, items);
    }

    /// Heading plus items; skipped when there are none.
    fn optional_list(&mut self, indent: usize, label: &str, items: &[String]) {
        if !items.is_empty() {
            self.list(indent, label, items);
        }
    }

    /// Heading plus `key: value` lines; skipped when there are none.
    fn optional_pairs(&mut self, indent: usize, label: &str, pairs: &[(String, String)]) {
        if !pairs.is_empty() {
            self.heading(indent, label);
            for (key, value) in pairs {
                self.field(indent + 2, key, value);
            }
        }
    }

    fn categories(&mut self, indent: usize, categories: &[Category]) {
        for category in categories {
            self.list(indent, &category.name, &category.items);
        }
    }

    fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

fn metadata(out: &mut TextWriter<'_>, metadata: &Metadata) {
    out.section("SPECIFICATION");
    out.field(0, "Name", &metadata.name);
    out.field(0, "Version", &metadata.version);
    out.field(0, "Description", &metadata.description);
    if !metadata.tags.is_empty() {
        out.field(0, "Tags", &metadata.tags.join(", "));
    }
    if !metadata.authors.is_empty() {
        out.field(0, "Authors", &metadata.authors.join(", "));
    }
    for (key, value) in &metadata.extra {
        out.field(0, key, value);
    }
    out.blank();
}

fn header_format(out: &mut TextWriter<'_>, header: &HeaderFormat) {
    out.section("HEADER FORMAT");
    out.field(0, "Border Line", &header.border_line);
    for (label, value) in [
        ("File Name Line", &header.file_name_line),
        ("Description Line", &header.description_line),
        ("Blank Comment", &header.blank_comment),
    ] {
        if !value.is_empty() {
            out.field(0, label, value);
        }
    }
    out.heading(0, "Assembly Lines");
    for line in &header.assembly_lines {
        out.line(format!("  {line}"));
    }
    out.heading(0, "Directives");
    for directive in &header.directives {
        out.line(format!("  {directive}"));
    }
    out.blank();
}

fn registers(out: &mut TextWriter<'_>, registers: &[RegisterEntry]) {
    out.section("REGISTER USAGE");
    for reg in registers {
        out.field(0, "Register", &reg.name);
        out.field(0, "Purpose", &reg.purpose);
        if !reg.byte_regs.is_empty() {
            out.field(0, "Byte Registers", &reg.byte_regs.join(", "));
        }
        out.optional_list(0, "Constraints", &reg.constraints);
        out.blank();
    }
    if registers.is_empty() {
        out.blank();
    }
}

fn structures(out: &mut TextWriter<'_>, structures: &[Structure]) {
    out.section("DATA STRUCTURES");
    for structure in structures {
        out.field(0, "Structure", &structure.name);
        out.field(0, "Documentation", &structure.documentation);
        out.heading(0, "Fields");
        for field in &structure.fields {
            out.line(format!(
                "  {} ({}): {}",
                field.name, field.field_type, field.description
            ));
            out.items(4, &field.constraints);
        }
        out.optional_list(0, "Constraints", &structure.constraints);
        out.optional_list(0, "Examples", &structure.examples);
        out.optional_pairs(0, "Complexity", &structure.complexity);
        out.blank();
    }
    if structures.is_empty() {
        out.blank();
    }
}

fn algorithms(out: &mut TextWriter<'_>, algorithms: &[Algorithm]) {
    out.section("ALGORITHMS");
    for algo in algorithms {
        out.field(0, "Algorithm", &algo.name);
        out.field(0, "Description", &algo.description);
        out.heading(0, "Implementation Requirements");
        out.categories(2, &algo.implementation_requirements);
        out.heading(0, "Steps");
        out.categories(2, &algo.steps);
        out.optional_pairs(0, "Complexity", &algo.complexity);
        out.optional_list(0, "Edge Cases", &algo.edge_cases);
        out.optional_list(0, "Preconditions", &algo.preconditions);
        out.optional_list(0, "Postconditions", &algo.postconditions);
        out.optional_list(0, "Invariants", &algo.invariants);
        if !algo.examples.is_empty() {
            out.heading(0, "Examples");
            for example in &algo.examples {
                for (i, (key, value)) in example.iter().enumerate() {
                    let bullet = if i == 0 { "- " } else { "  " };
                    out.field(2, &format!("{bullet}{key}"), value);
                }
            }
        }
        out.blank();
    }
    if algorithms.is_empty() {
        out.blank();
    }
}

fn error_handling(out: &mut TextWriter<'_>, errors: &ErrorHandling) {
    out.section("ERROR HANDLING");
    out.heading(0, "Strategies");
    out.categories(2, &errors.strategies);
    out.heading(0, "Error Types");
    for error_type in &errors.error_types {
        out.heading(2, &error_type.name);
        out.field(4, "Description", &error_type.description);
        out.list(4, "Handling", &error_type.handling);
    }
    out.list(0, "Syscall Requirements", &errors.syscall_requirements);
    out.blank();
}

fn section_requirements(out: &mut TextWriter<'_>, sections: &SectionRequirements) {
    out.section("SECTION REQUIREMENTS");
    out.list(0, "Data Section", &sections.data);
    out.heading(0, "BSS Section");
    for region in &sections.bss {
        out.heading(2, &region.name);
        out.field(4, "Size", &region.size.to_string());
        if let Some(align) = region.align {
            out.field(4, "Align", &align.to_string());
        }
        out.field(4, "Purpose", &region.purpose);
    }
    out.heading(0, "Text Section");
    out.categories(2, &sections.text);
    out.blank();
}

fn performance(out: &mut TextWriter<'_>, perf: &Performance) {
    out.section("PERFORMANCE");
    out.field(0, "Time Complexity", &perf.time_complexity);
    out.field(0, "Space Complexity", &perf.space_complexity);
    out.list(0, "Constraints", &perf.constraints);
    out.list(0, "Register Usage", &perf.register_usage);
    out.list(0, "Memory Access", &perf.memory_access);
    out.heading(0, "Benchmarks");
    for bench in &perf.benchmarks {
        out.heading(2, &bench.name);
        out.field(4, "Input Size", &bench.input_size);
        if let Some(expected) = &bench.expected_time {
            out.field(4, "Expected Time", expected);
        }
        out.optional_list(4, "Requirements", &bench.requirements);
    }
    out.blank();
}

fn testing(out: &mut TextWriter<'_>, testing: &Testing) {
    out.section("TESTING");
    out.heading(0, "Unit Tests");
    for test in &testing.unit_tests {
        out.heading(2, &test.name);
        out.field(4, "Input", &test.input);
        out.field(4, "Expected Output", &test.expected_output);
        out.optional_list(4, "Validation", &test.validation);
    }
    out.heading(0, "Integration Tests");
    for test in &testing.integration_tests {
        out.heading(2, &test.name);
        out.optional_list(4, "Validation", &test.validation);
        out.categories(4, &test.details);
    }
    out.heading(0, "Conformance Tests");
    for suite in &testing.conformance_tests {
        out.field(2, "Standard", &suite.standard);
        if !suite.test_vectors.is_empty() {
            out.heading(4, "Test Vectors");
            for vector in &suite.test_vectors {
                out.field(6, "- Input", vector.input.as_deref().unwrap_or(""));
                out.field(8, "Output", vector.output.as_deref().unwrap_or(""));
            }
        }
    }
    out.blank();
}

fn code_style(out: &mut TextWriter<'_>, style: &CodeStyle) {
    out.section("CODE STYLE");
    for (key, label) in STYLE_CATEGORIES {
        let items = find_category(&style.rules, key)
            .map(|c| c.items.as_slice())
            .unwrap_or_default();
        out.list(0, label, items);
    }
    for category in &style.rules {
        if !STYLE_CATEGORIES.iter().any(|(key, _)| *key == category.name) {
            out.list(0, &category.name, &category.items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;

    const MINIMAL: &str = r#"
metadata: {name: base64, version: "1.0", description: Base64 encoder}
register_usage:
  - {name: rax, purpose: accumulator, byte_regs: [al]}
"#;

    fn checked(yaml: &str) -> Checked {
        let tree: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        Pipeline::default().check(&tree).unwrap()
    }

    fn render(yaml: &str) -> String {
        render_text(&checked(yaml), &ForgeSettings::default()).unwrap().text
    }

    #[test]
    fn minimal_document_golden() {
        let expected = "\
=== SPECIFICATION ===
Name: base64
Version: 1.0
Description: Base64 encoder

=== HEADER FORMAT ===
Border Line:
Assembly Lines:
Directives:

=== REGISTER USAGE ===
Register: rax
Purpose: accumulator
Byte Registers: al

=== DATA STRUCTURES ===

=== ALGORITHMS ===

=== ERROR HANDLING ===
Strategies:
Error Types:
Syscall Requirements:

=== SECTION REQUIREMENTS ===
Data Section:
BSS Section:
Text Section:

=== PERFORMANCE ===
Time Complexity:
Space Complexity:
Constraints:
Register Usage:
Memory Access:
Benchmarks:

=== TESTING ===
Unit Tests:
Integration Tests:
Conformance Tests:

=== CODE STYLE ===
Indentation:
Comments:
Naming:
Organization:
";
        assert_eq!(render(MINIMAL), expected);
    }

    #[test]
    fn algorithm_block_golden() {
        let text = render(
            r#"
metadata: {name: t, version: "1"}
register_usage: [rax]
algorithms:
  - name: encode
    description: Encode a block
    implementation_requirements:
      memory_operations: [Load three bytes]
    steps:
      main_loop: [Load rax, Store rax]
    complexity: {time: O(n)}
    edge_cases: [Empty input]
"#,
        );
        let expected = "\
=== ALGORITHMS ===
Algorithm: encode
Description: Encode a block
Implementation Requirements:
  memory_operations:
    - Load three bytes
Steps:
  main_loop:
    - Load rax
    - Store rax
Complexity:
  time: O(n)
Edge Cases:
  - Empty input

";
        assert!(text.contains(expected), "got:\n{text}");
    }

    #[test]
    fn optional_blocks_omitted_when_empty() {
        let text = render(MINIMAL);
        assert!(!text.contains("Tags:"));
        assert!(!text.contains("Constraints:\n  -"));
        assert!(!text.contains("Edge Cases:"));
        assert!(!text.contains("Align:"));
    }

    #[test]
    fn bss_region_with_symbolic_size() {
        let text = render(
            r#"
metadata: {name: t, version: "1"}
header_format:
  directives: ["BUF_SIZE equ 4096"]
section_requirements:
  bss:
    - {name: buffer, size: BUF_SIZE, align: 16, purpose: scratch}
"#,
        );
        assert!(text.contains(
            "BSS Section:\n  buffer:\n    Size: BUF_SIZE\n    Align: 16\n    Purpose: scratch\n"
        ));
    }

    #[test]
    fn conformance_vectors_render() {
        let text = render(
            r#"
metadata: {name: t, version: "1"}
testing:
  conformance_tests:
    - standard: RFC 4648
      test_vectors:
        - {input: "f", output: "Zg=="}
"#,
        );
        assert!(text.contains(
            "Conformance Tests:\n  Standard: RFC 4648\n    Test Vectors:\n      - Input: f\n        Output: Zg==\n"
        ));
    }

    #[test]
    fn custom_border_marker() {
        let settings = ForgeSettings {
            border_marker: "##".into(),
            ..Default::default()
        };
        let artifact = render_text(&checked(MINIMAL), &settings).unwrap();
        assert!(artifact.text.starts_with("## SPECIFICATION ##\n"));
    }

    #[test]
    fn extra_style_categories_follow_fixed_ones() {
        let text = render(
            r#"
metadata: {name: t, version: "1"}
code_style:
  labels: [Prefix local labels with a dot]
  naming: [snake_case]
"#,
        );
        assert!(text.ends_with(
            "Naming:\n  - snake_case\nOrganization:\nlabels:\n  - Prefix local labels with a dot\n"
        ));
    }

    #[test]
    fn multi_line_prose_is_indented() {
        let text = render(
            r#"
metadata: {name: t, version: "1", description: "First line\n=== TESTING ==="}
algorithms:
  - name: encode
    steps:
      main:
        - |
          Read a block
          === CODE STYLE ===
"#,
        );
        assert!(text.contains("Description: First line\n  === TESTING ===\n"));
        assert!(text.contains("    - Read a block\n      === CODE STYLE ===\n"));
        assert_eq!(text.matches("\n=== TESTING ===").count(), 1);
        assert_eq!(text.matches("\n=== CODE STYLE ===").count(), 1);
    }

    #[test]
    fn structure_complexity_and_algorithm_examples_render() {
        let text = render(
            r#"
metadata: {name: t, version: "1"}
structures:
  - name: LookupTable
    complexity: {lookup: O(1)}
algorithms:
  - name: encode
    examples:
      - {input: f, output: Zg==}
      - Encoding nothing yields nothing
"#,
        );
        assert!(text.contains("Complexity:\n  lookup: O(1)\n"));
        assert!(text.contains(
            "Examples:\n  - input: f\n    output: Zg==\n  - example: Encoding nothing yields nothing\n"
        ));
    }

    #[test]
    fn rendering_is_idempotent() {
        let d = checked(MINIMAL);
        let settings = ForgeSettings::default();
        let first = render_text(&d, &settings).unwrap();
        let second = render_text(&d, &settings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn refuses_document_with_errors() {
        let d = checked(
            r#"
metadata: {name: t, version: "1"}
structures: [DataBuffer, DataBuffer]
"#,
        );
        let err = render_text(&d, &ForgeSettings::default()).unwrap_err();
        assert!(matches!(err, SpecForgeError::RenderPrecondition { errors: 1 }));
    }

    #[test]
    fn warnings_do_not_block_rendering() {
        let d = checked(
            r#"
metadata: {name: t, version: "1"}
error_handling:
  error_types: [padding_error]
"#,
        );
        assert_eq!(d.report().warning_count(), 1);
        assert!(render_text(&d, &ForgeSettings::default()).is_ok());
    }
}
