//! Strongly-typed specification document model.
//!
//! These types are produced once per input by the normalizer in
//! [`super::normalize`] and are only ever read afterwards. Collections keep
//! the insertion order of the source document so the renderer can reproduce
//! it; validation does not depend on that order.

use std::fmt;

/// Root of a normalized specification document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecDocument {
    pub metadata: Metadata,
    pub header_format: HeaderFormat,
    pub registers: Vec<RegisterEntry>,
    pub structures: Vec<Structure>,
    pub algorithms: Vec<Algorithm>,
    pub error_handling: ErrorHandling,
    pub section_requirements: SectionRequirements,
    pub performance: Performance,
    pub testing: Testing,
    pub code_style: CodeStyle,
    /// Unrecognized top-level keys, kept verbatim and never validated.
    pub extensions: Vec<(String, serde_yaml::Value)>,
}

/// A named list of prose lines, e.g. one phase of an algorithm's steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub items: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}

/// Look up a category by name.
pub fn find_category<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.name == name)
}

/// Document identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub version: String,
    pub description: String,
    pub tags: Vec<String>,
    pub authors: Vec<String>,
    /// Any other scalar metadata keys, in source order.
    pub extra: Vec<(String, String)>,
}

/// Header requirements for the generated source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFormat {
    pub border_line: String,
    pub file_name_line: String,
    pub description_line: String,
    pub blank_comment: String,
    pub assembly_lines: Vec<String>,
    /// Raw directive lines; some of them define symbolic constants.
    pub directives: Vec<String>,
}

/// One declared register.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterEntry {
    pub name: String,
    pub purpose: String,
    /// Sub-register aliases (e.g. `al` for `rax`); they count as declared.
    pub byte_regs: Vec<String>,
    pub constraints: Vec<String>,
    /// Dotted source path of this entry.
    pub path: String,
}

/// A field inside a data structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub field_type: String,
    pub description: String,
    pub constraints: Vec<String>,
}

/// A declared data structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Structure {
    pub name: String,
    pub fields: Vec<Field>,
    pub constraints: Vec<String>,
    pub documentation: String,
    pub examples: Vec<String>,
    /// Cost of the structure's operations, e.g. `lookup` / `O(1)`.
    pub complexity: Vec<(String, String)>,
    pub path: String,
}

/// A worked example as key/value pairs such as `input` and `output`.
///
/// A scalar example is stored under the key `example`.
pub type Example = Vec<(String, String)>;

/// A declared algorithm.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Algorithm {
    pub name: String,
    pub description: String,
    /// Requirement category to text; nested maps are flattened to dotted names.
    pub implementation_requirements: Vec<Category>,
    /// Phase name to step text.
    pub steps: Vec<Category>,
    /// e.g. `time` / `space`.
    pub complexity: Vec<(String, String)>,
    pub edge_cases: Vec<String>,
    pub preconditions: Vec<String>,
    pub postconditions: Vec<String>,
    pub invariants: Vec<String>,
    pub examples: Vec<Example>,
    pub path: String,
}

/// A declared error type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorType {
    pub name: String,
    pub description: String,
    pub handling: Vec<String>,
    pub path: String,
}

/// Error handling section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorHandling {
    pub strategies: Vec<Category>,
    pub error_types: Vec<ErrorType>,
    pub syscall_requirements: Vec<String>,
}

/// Size of a reserved memory region: a literal or a symbolic constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSize {
    Literal(u64),
    Symbol(String),
}

impl Default for RegionSize {
    fn default() -> Self {
        RegionSize::Literal(0)
    }
}

impl fmt::Display for RegionSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionSize::Literal(n) => write!(f, "{}", n),
            RegionSize::Symbol(s) => write!(f, "{}", s),
        }
    }
}

/// A reserved (BSS) memory region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSpec {
    pub name: String,
    pub size: RegionSize,
    pub align: Option<u64>,
    pub purpose: String,
    pub path: String,
}

/// Per-section layout requirements of the generated program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRequirements {
    pub data: Vec<String>,
    pub bss: Vec<RegionSpec>,
    /// `organization` and `branching` are conventional; others are kept.
    pub text: Vec<Category>,
}

/// A performance benchmark.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Benchmark {
    pub name: String,
    pub input_size: String,
    pub expected_time: Option<String>,
    pub requirements: Vec<String>,
    pub path: String,
}

/// Performance requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Performance {
    pub time_complexity: String,
    pub space_complexity: String,
    pub constraints: Vec<String>,
    pub register_usage: Vec<String>,
    pub memory_access: Vec<String>,
    pub benchmarks: Vec<Benchmark>,
}

/// A unit test case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitTest {
    pub name: String,
    pub input: String,
    pub expected_output: String,
    pub validation: Vec<String>,
    pub path: String,
}

/// An integration test case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationTest {
    pub name: String,
    pub validation: Vec<String>,
    /// Remaining keys of the test entry, in source order.
    pub details: Vec<Category>,
    pub path: String,
}

/// A single conformance test vector.
///
/// Keys are optional here so that a missing key survives normalization and
/// is reported as a diagnostic rather than a schema failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestVector {
    pub input: Option<String>,
    pub output: Option<String>,
    pub path: String,
}

/// A conformance suite against an external standard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConformanceTest {
    pub standard: String,
    pub test_vectors: Vec<TestVector>,
    pub path: String,
}

/// Testing section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Testing {
    pub unit_tests: Vec<UnitTest>,
    pub integration_tests: Vec<IntegrationTest>,
    pub conformance_tests: Vec<ConformanceTest>,
}

/// Free-form code style rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeStyle {
    pub rules: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_size_display() {
        assert_eq!(RegionSize::Literal(4096).to_string(), "4096");
        assert_eq!(RegionSize::Symbol("BUF_SIZE".into()).to_string(), "BUF_SIZE");
    }

    #[test]
    fn find_category_by_name() {
        let categories = vec![
            Category::new("organization", vec!["one".into()]),
            Category::new("branching", vec![]),
        ];
        assert_eq!(
            find_category(&categories, "organization").map(|c| c.items.len()),
            Some(1)
        );
        assert!(find_category(&categories, "missing").is_none());
    }
}
