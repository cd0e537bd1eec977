//! Canonical YAML form of a normalized document.
//!
//! Named collections are written as sequences of mappings with a `name`
//! key, category groups as mappings, and empty optional values are left
//! out. Normalizing the output yields the same document again, provided
//! the source also used sequence form (entry paths record which form was
//! used).

use serde_yaml::{Mapping, Value};

use crate::document::{
    Algorithm, Category, ConformanceTest, ErrorHandling, Field, HeaderFormat, IntegrationTest,
    Metadata, Performance, RegionSize, RegionSpec, RegisterEntry, SectionRequirements,
    SpecDocument, Structure, Testing, UnitTest,
};
use crate::error::{Result, SpecForgeError};

/// Serialize `doc` to canonical YAML text.
pub fn render_yaml(doc: &SpecDocument) -> Result<String> {
    let tree = to_tree(doc);
    serde_yaml::to_string(&tree).map_err(|e| SpecForgeError::Other(e.into()))
}

/// Build the canonical generic tree for `doc`.
pub fn to_tree(doc: &SpecDocument) -> Value {
    let mut root = MapBuilder::new();
    root.value("metadata", metadata(&doc.metadata));
    root.optional("header_format", header_format(&doc.header_format));
    root.list_of("register_usage", doc.registers.iter().map(register));
    root.list_of("structures", doc.structures.iter().map(structure));
    root.list_of("algorithms", doc.algorithms.iter().map(algorithm));
    root.optional("error_handling", error_handling(&doc.error_handling));
    root.optional(
        "section_requirements",
        section_requirements(&doc.section_requirements),
    );
    root.optional("performance", performance(&doc.performance));
    root.optional("testing", testing(&doc.testing));
    root.categories("code_style", &doc.code_style.rules);
    for (key, value) in &doc.extensions {
        root.value(key, value.clone());
    }
    root.finish()
}

/// Insertion-ordered mapping that skips empty optional values.
struct MapBuilder {
    map: Mapping,
}

impl MapBuilder {
    fn new() -> Self {
        Self {
            map: Mapping::new(),
        }
    }

    fn value(&mut self, key: &str, value: Value) {
        self.map.insert(Value::String(key.to_string()), value);
    }

    fn text(&mut self, key: &str, text: &str) {
        self.value(key, Value::String(text.to_string()));
    }

    fn optional_text(&mut self, key: &str, text: &str) {
        if !text.is_empty() {
            self.text(key, text);
        }
    }

    fn strings(&mut self, key: &str, items: &[String]) {
        self.value(key, strings(items));
    }

    fn optional_strings(&mut self, key: &str, items: &[String]) {
        if !items.is_empty() {
            self.strings(key, items);
        }
    }

    fn list_of(&mut self, key: &str, items: impl Iterator<Item = Value>) {
        let items: Vec<Value> = items.collect();
        if !items.is_empty() {
            self.value(key, Value::Sequence(items));
        }
    }

    fn categories(&mut self, key: &str, categories: &[Category]) {
        if !categories.is_empty() {
            let mut inner = MapBuilder::new();
            for category in categories {
                inner.strings(&category.name, &category.items);
            }
            self.value(key, inner.finish());
        }
    }

    fn optional_pairs(&mut self, key: &str, items: &[(String, String)]) {
        self.optional(key, pairs(items));
    }

    /// Insert a nested mapping unless it came out empty.
    fn optional(&mut self, key: &str, value: Value) {
        if matches!(&value, Value::Mapping(m) if m.is_empty()) {
            return;
        }
        self.value(key, value);
    }

    fn finish(self) -> Value {
        Value::Mapping(self.map)
    }
}

fn strings(items: &[String]) -> Value {
    Value::Sequence(items.iter().map(|s| Value::String(s.clone())).collect())
}

fn pairs(items: &[(String, String)]) -> Value {
    let mut out = MapBuilder::new();
    for (key, value) in items {
        out.text(key, value);
    }
    out.finish()
}

fn metadata(metadata: &Metadata) -> Value {
    let mut out = MapBuilder::new();
    out.text("name", &metadata.name);
    out.text("version", &metadata.version);
    out.optional_text("description", &metadata.description);
    out.optional_strings("tags", &metadata.tags);
    out.optional_strings("authors", &metadata.authors);
    for (key, value) in &metadata.extra {
        out.text(key, value);
    }
    out.finish()
}

fn header_format(header: &HeaderFormat) -> Value {
    let mut out = MapBuilder::new();
    out.optional_text("border_line", &header.border_line);
    out.optional_text("file_name_line", &header.file_name_line);
    out.optional_text("description_line", &header.description_line);
    out.optional_text("blank_comment", &header.blank_comment);
    out.optional_strings("assembly_lines", &header.assembly_lines);
    out.optional_strings("directives", &header.directives);
    out.finish()
}

fn register(reg: &RegisterEntry) -> Value {
    let mut out = MapBuilder::new();
    out.text("name", &reg.name);
    out.optional_text("purpose", &reg.purpose);
    out.optional_strings("byte_regs", &reg.byte_regs);
    out.optional_strings("constraints", &reg.constraints);
    out.finish()
}

fn field(field: &Field) -> Value {
    let mut out = MapBuilder::new();
    out.text("name", &field.name);
    out.text("type", &field.field_type);
    out.optional_text("description", &field.description);
    out.optional_strings("constraints", &field.constraints);
    out.finish()
}

fn structure(structure: &Structure) -> Value {
    let mut out = MapBuilder::new();
    out.text("name", &structure.name);
    out.list_of("fields", structure.fields.iter().map(field));
    out.optional_strings("constraints", &structure.constraints);
    out.optional_text("documentation", &structure.documentation);
    out.optional_strings("examples", &structure.examples);
    out.optional_pairs("complexity", &structure.complexity);
    out.finish()
}

fn algorithm(algo: &Algorithm) -> Value {
    let mut out = MapBuilder::new();
    out.text("name", &algo.name);
    out.optional_text("description", &algo.description);
    out.categories("implementation_requirements", &algo.implementation_requirements);
    out.categories("steps", &algo.steps);
    out.optional_pairs("complexity", &algo.complexity);
    out.optional_strings("edge_cases", &algo.edge_cases);
    out.optional_strings("preconditions", &algo.preconditions);
    out.optional_strings("postconditions", &algo.postconditions);
    out.optional_strings("invariants", &algo.invariants);
    out.list_of("examples", algo.examples.iter().map(|example| pairs(example)));
    out.finish()
}

fn error_handling(errors: &ErrorHandling) -> Value {
    let mut out = MapBuilder::new();
    out.categories("strategies", &errors.strategies);
    // Description and handling are always written: when absent they
    // normalize to generated defaults, not to empty values.
    out.list_of(
        "error_types",
        errors.error_types.iter().map(|error_type| {
            let mut entry = MapBuilder::new();
            entry.text("name", &error_type.name);
            entry.text("description", &error_type.description);
            entry.strings("handling", &error_type.handling);
            entry.finish()
        }),
    );
    out.optional_strings("syscall_requirements", &errors.syscall_requirements);
    out.finish()
}

fn region(region: &RegionSpec) -> Value {
    let mut out = MapBuilder::new();
    out.text("name", &region.name);
    let size = match &region.size {
        RegionSize::Literal(n) => Value::Number((*n).into()),
        RegionSize::Symbol(s) => Value::String(s.clone()),
    };
    out.value("size", size);
    if let Some(align) = region.align {
        out.value("align", Value::Number(align.into()));
    }
    out.optional_text("purpose", &region.purpose);
    out.finish()
}

fn section_requirements(sections: &SectionRequirements) -> Value {
    let mut out = MapBuilder::new();
    out.optional_strings("data", &sections.data);
    out.list_of("bss", sections.bss.iter().map(region));
    out.categories("text", &sections.text);
    out.finish()
}

fn performance(perf: &Performance) -> Value {
    let mut out = MapBuilder::new();
    out.optional_text("time_complexity", &perf.time_complexity);
    out.optional_text("space_complexity", &perf.space_complexity);
    out.optional_strings("constraints", &perf.constraints);
    out.optional_strings("register_usage", &perf.register_usage);
    out.optional_strings("memory_access", &perf.memory_access);
    out.list_of(
        "benchmarks",
        perf.benchmarks.iter().map(|bench| {
            let mut entry = MapBuilder::new();
            entry.text("name", &bench.name);
            entry.optional_text("input_size", &bench.input_size);
            if let Some(expected) = &bench.expected_time {
                entry.text("expected_time", expected);
            }
            entry.optional_strings("requirements", &bench.requirements);
            entry.finish()
        }),
    );
    out.finish()
}

fn unit_test(test: &UnitTest) -> Value {
    let mut out = MapBuilder::new();
    out.text("name", &test.name);
    out.text("input", &test.input);
    out.text("expected_output", &test.expected_output);
    out.optional_strings("validation", &test.validation);
    out.finish()
}

fn integration_test(test: &IntegrationTest) -> Value {
    let mut out = MapBuilder::new();
    out.text("name", &test.name);
    out.optional_strings("validation", &test.validation);
    for detail in &test.details {
        out.strings(&detail.name, &detail.items);
    }
    out.finish()
}

fn conformance_test(suite: &ConformanceTest) -> Value {
    let mut out = MapBuilder::new();
    out.optional_text("standard", &suite.standard);
    out.list_of(
        "test_vectors",
        suite.test_vectors.iter().map(|vector| {
            let mut entry = MapBuilder::new();
            if let Some(input) = &vector.input {
                entry.text("input", input);
            }
            if let Some(output) = &vector.output {
                entry.text("output", output);
            }
            entry.finish()
        }),
    );
    out.finish()
}

fn testing(testing: &Testing) -> Value {
    let mut out = MapBuilder::new();
    out.list_of("unit_tests", testing.unit_tests.iter().map(unit_test));
    out.list_of(
        "integration_tests",
        testing.integration_tests.iter().map(integration_test),
    );
    out.list_of(
        "conformance_tests",
        testing.conformance_tests.iter().map(conformance_test),
    );
    out.finish()
}
