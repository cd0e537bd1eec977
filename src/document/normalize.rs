//! Schema normalization.
//!
//! Turns the loosely-typed tree produced by the loader into a
//! [`SpecDocument`]. Every coercion rule lives here:
//!
//! - a scalar assigned to a list-typed field becomes a one-element list
//! - numbers and booleans coerce to text, `null` to an empty value
//! - named collections may be written as a map keyed by name or as a
//!   sequence of maps carrying a `name` key
//! - nested maps under category fields flatten into dotted category names
//! - unrecognized top-level keys are kept as opaque extensions
//!
//! Normalization is a pure function of the input tree.

use serde_yaml::{Mapping, Value};

use super::constants::parse_int_literal;
use super::path::{child, index};
use super::schema::{
    Algorithm, Benchmark, Category, CodeStyle, ConformanceTest, ErrorHandling, ErrorType, Example,
    Field, HeaderFormat, IntegrationTest, Metadata, Performance, RegionSize, RegionSpec,
    RegisterEntry, SectionRequirements, SpecDocument, Structure, TestVector, Testing, UnitTest,
};
use crate::error::SchemaError;

type Result<T> = std::result::Result<T, SchemaError>;

/// Top-level keys with a typed meaning.
pub const KNOWN_SECTIONS: &[&str] = &[
    "metadata",
    "header_format",
    "register_usage",
    "structures",
    "data_structures",
    "algorithms",
    "error_handling",
    "section_requirements",
    "performance",
    "testing",
    "code_style",
];

const DEFAULT_HANDLING: [&str; 3] = ["Detect", "Log", "Handle"];
const UNSPECIFIED: &str = "TBD";

/// Normalize a generic document tree into a [`SpecDocument`].
///
/// # Errors
///
/// Returns a [`SchemaError`] when the `metadata` section is absent, a
/// required key is missing, or a value cannot be coerced to its type.
pub fn normalize(tree: &Value) -> Result<SpecDocument> {
    let root = match untag(tree) {
        Value::Mapping(map) => map,
        Value::Null => return Err(SchemaError::new("metadata", "required section is missing")),
        other => {
            return Err(SchemaError::new(
                "<root>",
                format!("document root must be a mapping, found {}", kind(other)),
            ))
        }
    };

    let metadata = match root.get("metadata").map(untag) {
        None | Some(Value::Null) => {
            return Err(SchemaError::new("metadata", "required section is missing"))
        }
        Some(value) => normalize_metadata(value, "metadata")?,
    };

    let mut extensions = Vec::new();
    for (key, value) in root {
        let key = key_text(key, "")?;
        if !KNOWN_SECTIONS.contains(&key.as_str()) {
            extensions.push((key, value.clone()));
        }
    }

    Ok(SpecDocument {
        metadata,
        header_format: normalize_header_format(root.get("header_format"), "header_format")?,
        registers: normalize_registers(root.get("register_usage"), "register_usage")?,
        structures: normalize_structure_sections(root)?,
        algorithms: normalize_algorithms(root.get("algorithms"), "algorithms")?,
        error_handling: normalize_error_handling(root.get("error_handling"), "error_handling")?,
        section_requirements: normalize_sections(
            root.get("section_requirements"),
            "section_requirements",
        )?,
        performance: normalize_performance(root.get("performance"), "performance")?,
        testing: normalize_testing(root.get("testing"), "testing")?,
        code_style: CodeStyle {
            rules: categories(root.get("code_style"), "code_style", "general")?,
        },
        extensions,
    })
}

// `data_structures` is an alias of `structures`. When both are present
// their entries are concatenated, `structures` first, so duplicates
// across the two still reach duplicate detection.
fn normalize_structure_sections(root: &Mapping) -> Result<Vec<Structure>> {
    let mut structures = normalize_structures(root.get("structures"), "structures")?;
    structures.extend(normalize_structures(
        root.get("data_structures"),
        "data_structures",
    )?);
    Ok(structures)
}

fn normalize_metadata(value: &Value, path: &str) -> Result<Metadata> {
    let map = require_mapping(value, path)?;
    let mut metadata = Metadata {
        name: required_text(map, "name", path)?,
        version: required_text(map, "version", path)?,
        description: text_field(map, "description", path)?,
        tags: text_list(map.get("tags"), &child(path, "tags"))?,
        authors: text_list(map.get("authors"), &child(path, "authors"))?,
        extra: Vec::new(),
    };
    for (key, value) in map {
        let key = key_text(key, path)?;
        if !matches!(
            key.as_str(),
            "name" | "version" | "description" | "tags" | "authors"
        ) {
            let text = scalar_text(value, &child(path, &key))?;
            metadata.extra.push((key, text));
        }
    }
    Ok(metadata)
}

fn normalize_header_format(value: Option<&Value>, path: &str) -> Result<HeaderFormat> {
    let Some(map) = optional_mapping(value, path)? else {
        return Ok(HeaderFormat::default());
    };
    Ok(HeaderFormat {
        border_line: text_field(map, "border_line", path)?,
        file_name_line: text_field(map, "file_name_line", path)?,
        description_line: text_field(map, "description_line", path)?,
        blank_comment: text_field(map, "blank_comment", path)?,
        assembly_lines: text_list(map.get("assembly_lines"), &child(path, "assembly_lines"))?,
        directives: text_list(map.get("directives"), &child(path, "directives"))?,
    })
}

fn normalize_registers(value: Option<&Value>, path: &str) -> Result<Vec<RegisterEntry>> {
    // `register_usage: {general_purpose: [...]}` or a bare list.
    let (list, list_path) = match value.map(untag) {
        Some(Value::Mapping(map)) => {
            let inner_path = child(path, "general_purpose");
            (map.get("general_purpose"), inner_path)
        }
        other => (other, path.to_string()),
    };

    named_entries(list, &list_path)?
        .into_iter()
        .map(|entry| {
            let body = entry.body;
            Ok(RegisterEntry {
                purpose: body.map_or(Ok(String::new()), |m| text_field(m, "purpose", &entry.path))?,
                byte_regs: list_of(body, "byte_regs", &entry.path)?,
                constraints: list_of(body, "constraints", &entry.path)?,
                name: entry.name,
                path: entry.path,
            })
        })
        .collect()
}

fn normalize_structures(value: Option<&Value>, path: &str) -> Result<Vec<Structure>> {
    named_entries(value, path)?
        .into_iter()
        .map(|entry| {
            let body = entry.body;
            Ok(Structure {
                fields: normalize_fields(
                    body.and_then(|m| m.get("fields")),
                    &child(&entry.path, "fields"),
                )?,
                constraints: list_of(body, "constraints", &entry.path)?,
                documentation: body
                    .map_or(Ok(String::new()), |m| text_field(m, "documentation", &entry.path))?,
                examples: list_of(body, "examples", &entry.path)?,
                complexity: pairs(
                    body.and_then(|m| m.get("complexity")),
                    &child(&entry.path, "complexity"),
                    "overall",
                )?,
                name: entry.name,
                path: entry.path,
            })
        })
        .collect()
}

fn normalize_examples(value: Option<&Value>, path: &str) -> Result<Vec<Example>> {
    sequence(value, path)?
        .into_iter()
        .enumerate()
        .map(|(i, item)| pairs(Some(item), &index(path, i), "example"))
        .collect()
}

fn normalize_fields(value: Option<&Value>, path: &str) -> Result<Vec<Field>> {
    // `fields: {len: u64}` shorthand maps a field name straight to its type.
    if let Some(Value::Mapping(map)) = value.map(untag) {
        let mut fields = Vec::new();
        for (key, body) in map {
            let name = key_text(key, path)?;
            let field_path = child(path, &name);
            match untag(body) {
                Value::Mapping(m) => fields.push(Field {
                    field_type: required_text(m, "type", &field_path)?,
                    description: text_field(m, "description", &field_path)?,
                    constraints: text_list(
                        m.get("constraints"),
                        &child(&field_path, "constraints"),
                    )?,
                    name,
                }),
                other => fields.push(Field {
                    field_type: scalar_text(other, &field_path)?,
                    name,
                    ..Default::default()
                }),
            }
        }
        return Ok(fields);
    }

    sequence(value, path)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let field_path = index(path, i);
            let map = require_mapping(item, &field_path)?;
            Ok(Field {
                name: required_text(map, "name", &field_path)?,
                field_type: required_text(map, "type", &field_path)?,
                description: text_field(map, "description", &field_path)?,
                constraints: text_list(map.get("constraints"), &child(&field_path, "constraints"))?,
            })
        })
        .collect()
}

fn normalize_algorithms(value: Option<&Value>, path: &str) -> Result<Vec<Algorithm>> {
    named_entries(value, path)?
        .into_iter()
        .map(|entry| {
            let body = entry.body;
            let p = &entry.path;
            let get = |key: &str| body.and_then(|m| m.get(key));
            Ok(Algorithm {
                description: body.map_or(Ok(String::new()), |m| text_field(m, "description", p))?,
                implementation_requirements: categories(
                    get("implementation_requirements"),
                    &child(p, "implementation_requirements"),
                    "general",
                )?,
                steps: categories(get("steps"), &child(p, "steps"), "main")?,
                complexity: pairs(get("complexity"), &child(p, "complexity"), "overall")?,
                edge_cases: list_of(body, "edge_cases", p)?,
                preconditions: list_of(body, "preconditions", p)?,
                postconditions: list_of(body, "postconditions", p)?,
                invariants: list_of(body, "invariants", p)?,
                examples: normalize_examples(get("examples"), &child(p, "examples"))?,
                name: entry.name,
                path: entry.path,
            })
        })
        .collect()
}

fn normalize_error_handling(value: Option<&Value>, path: &str) -> Result<ErrorHandling> {
    let Some(map) = optional_mapping(value, path)? else {
        return Ok(ErrorHandling::default());
    };

    let error_types = named_entries(map.get("error_types"), &child(path, "error_types"))?
        .into_iter()
        .map(|entry| {
            let description = match entry.body {
                Some(m) if m.contains_key("description") => {
                    text_field(m, "description", &entry.path)?
                }
                _ => format!("Handle {}", entry.name),
            };
            let handling = match entry.body {
                Some(m) if m.contains_key("handling") => {
                    text_list(m.get("handling"), &child(&entry.path, "handling"))?
                }
                _ => DEFAULT_HANDLING.iter().map(|s| s.to_string()).collect(),
            };
            Ok(ErrorType {
                name: entry.name,
                description,
                handling,
                path: entry.path,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ErrorHandling {
        strategies: categories(map.get("strategies"), &child(path, "strategies"), "general")?,
        error_types,
        syscall_requirements: text_list(
            map.get("syscall_requirements"),
            &child(path, "syscall_requirements"),
        )?,
    })
}

fn normalize_sections(value: Option<&Value>, path: &str) -> Result<SectionRequirements> {
    let Some(map) = optional_mapping(value, path)? else {
        return Ok(SectionRequirements::default());
    };

    // `bss: {variables: [...]}` or a bare list.
    let bss_path = child(path, "bss");
    let (bss_list, bss_list_path) = match map.get("bss").map(untag) {
        Some(Value::Mapping(m)) => (m.get("variables"), child(&bss_path, "variables")),
        other => (other, bss_path),
    };

    let bss = sequence(bss_list, &bss_list_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let p = index(&bss_list_path, i);
            let m = require_mapping(item, &p)?;
            Ok(RegionSpec {
                name: required_text(m, "name", &p)?,
                size: region_size(m.get("size"), &child(&p, "size"))?,
                align: alignment(m.get("align"), &child(&p, "align"))?,
                purpose: text_field(m, "purpose", &p)?,
                path: p,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SectionRequirements {
        data: text_list(map.get("data"), &child(path, "data"))?,
        bss,
        text: categories(map.get("text"), &child(path, "text"), "organization")?,
    })
}

fn region_size(value: Option<&Value>, path: &str) -> Result<RegionSize> {
    match value.map(untag) {
        None | Some(Value::Null) => Err(SchemaError::new(path, "required field is missing")),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(RegionSize::Literal)
            .ok_or_else(|| {
                SchemaError::new(
                    path,
                    format!("size must be a non-negative integer, found {}", n),
                )
            }),
        Some(Value::String(s)) => {
            let s = s.trim();
            if let Some(n) = parse_int_literal(s) {
                Ok(RegionSize::Literal(n))
            } else if is_identifier(s) {
                Ok(RegionSize::Symbol(s.to_string()))
            } else {
                Err(SchemaError::new(
                    path,
                    format!("size '{}' is neither an integer nor a symbolic constant name", s),
                ))
            }
        }
        Some(other) => Err(SchemaError::new(
            path,
            format!("size must be an integer or a constant name, found {}", kind(other)),
        )),
    }
}

fn alignment(value: Option<&Value>, path: &str) -> Result<Option<u64>> {
    match value.map(untag) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| {
            SchemaError::new(path, format!("align must be a non-negative integer, found {}", n))
        }),
        Some(Value::String(s)) => parse_int_literal(s).map(Some).ok_or_else(|| {
            SchemaError::new(path, format!("align '{}' is not an integer", s))
        }),
        Some(other) => Err(SchemaError::new(
            path,
            format!("align must be an integer, found {}", kind(other)),
        )),
    }
}

fn normalize_performance(value: Option<&Value>, path: &str) -> Result<Performance> {
    let Some(map) = optional_mapping(value, path)? else {
        return Ok(Performance::default());
    };

    let benchmarks = named_entries(map.get("benchmarks"), &child(path, "benchmarks"))?
        .into_iter()
        .map(|entry| {
            let body = entry.body;
            let expected_time = match body.and_then(|m| m.get("expected_time")).map(untag) {
                None | Some(Value::Null) => None,
                Some(v) => Some(scalar_text(v, &child(&entry.path, "expected_time"))?),
            };
            Ok(Benchmark {
                input_size: body
                    .map_or(Ok(String::new()), |m| text_field(m, "input_size", &entry.path))?,
                expected_time,
                requirements: list_of(body, "requirements", &entry.path)?,
                name: entry.name,
                path: entry.path,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Performance {
        time_complexity: text_field(map, "time_complexity", path)?,
        space_complexity: text_field(map, "space_complexity", path)?,
        constraints: text_list(map.get("constraints"), &child(path, "constraints"))?,
        register_usage: text_list(map.get("register_usage"), &child(path, "register_usage"))?,
        memory_access: text_list(map.get("memory_access"), &child(path, "memory_access"))?,
        benchmarks,
    })
}

fn normalize_testing(value: Option<&Value>, path: &str) -> Result<Testing> {
    let Some(map) = optional_mapping(value, path)? else {
        return Ok(Testing::default());
    };

    let unit_path = child(path, "unit_tests");
    let unit_tests = sequence(map.get("unit_tests"), &unit_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let p = index(&unit_path, i);
            match untag(item) {
                Value::Mapping(m) => Ok(UnitTest {
                    name: required_text(m, "name", &p)?,
                    input: inline_field(m, "input", &p)?,
                    expected_output: inline_field(m, "expected_output", &p)?,
                    validation: text_list(m.get("validation"), &child(&p, "validation"))?,
                    path: p,
                }),
                other => Ok(UnitTest {
                    name: scalar_text(other, &p)?,
                    input: UNSPECIFIED.to_string(),
                    expected_output: UNSPECIFIED.to_string(),
                    validation: Vec::new(),
                    path: p,
                }),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let integration_path = child(path, "integration_tests");
    let integration_tests = sequence(map.get("integration_tests"), &integration_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let p = index(&integration_path, i);
            let Value::Mapping(m) = untag(item) else {
                return Ok(IntegrationTest {
                    name: scalar_text(item, &p)?,
                    path: p,
                    ..Default::default()
                });
            };
            let mut details = Vec::new();
            for (key, value) in m {
                let key = key_text(key, &p)?;
                if key != "name" && key != "validation" {
                    let items = text_list(Some(value), &child(&p, &key))?;
                    details.push(Category::new(key, items));
                }
            }
            Ok(IntegrationTest {
                name: required_text(m, "name", &p)?,
                validation: text_list(m.get("validation"), &child(&p, "validation"))?,
                details,
                path: p,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let conformance_path = child(path, "conformance_tests");
    let conformance_tests = sequence(map.get("conformance_tests"), &conformance_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let p = index(&conformance_path, i);
            let Value::Mapping(m) = untag(item) else {
                return Ok(ConformanceTest {
                    standard: scalar_text(item, &p)?,
                    test_vectors: Vec::new(),
                    path: p,
                });
            };
            let vectors_path = child(&p, "test_vectors");
            let test_vectors = sequence(m.get("test_vectors"), &vectors_path)?
                .iter()
                .enumerate()
                .map(|(j, vector)| test_vector(vector, index(&vectors_path, j)))
                .collect::<Result<Vec<_>>>()?;
            Ok(ConformanceTest {
                standard: text_field(m, "standard", &p)?,
                test_vectors,
                path: p,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Testing {
        unit_tests,
        integration_tests,
        conformance_tests,
    })
}

fn test_vector(value: &Value, path: String) -> Result<TestVector> {
    // Missing keys are kept as `None`; the validator reports them.
    let Value::Mapping(m) = untag(value) else {
        return Ok(TestVector {
            input: None,
            output: None,
            path,
        });
    };
    let key = |name: &str| -> Result<Option<String>> {
        match m.get(name) {
            None => Ok(None),
            Some(v) => inline_text(v, &child(&path, name)).map(Some),
        }
    };
    Ok(TestVector {
        input: key("input")?,
        output: key("output")?,
        path: path.clone(),
    })
}

// --- Named collections ---

/// One entry of a named collection, before section-specific decoding.
struct NamedEntry<'a> {
    name: String,
    /// `None` when the entry was written as a bare name.
    body: Option<&'a Mapping>,
    path: String,
}

/// Decode a collection written either as `{name: {...}}` or `[{name: ..}]`.
///
/// Sequence items may also be bare scalars, which become entries with no body.
fn named_entries<'a>(value: Option<&'a Value>, path: &str) -> Result<Vec<NamedEntry<'a>>> {
    match value.map(untag) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Mapping(map)) => map
            .iter()
            .map(|(key, body)| {
                let name = key_text(key, path)?;
                let entry_path = child(path, &name);
                let body = match untag(body) {
                    Value::Null => None,
                    other => Some(require_mapping(other, &entry_path)?),
                };
                Ok(NamedEntry {
                    name,
                    body,
                    path: entry_path,
                })
            })
            .collect(),
        Some(Value::Sequence(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let entry_path = index(path, i);
                match untag(item) {
                    Value::Mapping(m) => Ok(NamedEntry {
                        name: required_text(m, "name", &entry_path)?,
                        body: Some(m),
                        path: entry_path,
                    }),
                    other => Ok(NamedEntry {
                        name: scalar_text(other, &entry_path)?,
                        body: None,
                        path: entry_path,
                    }),
                }
            })
            .collect(),
        Some(other) => Err(SchemaError::new(
            path,
            format!("expected a mapping or a sequence, found {}", kind(other)),
        )),
    }
}

// --- Coercion primitives ---

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn require_mapping<'a>(value: &'a Value, path: &str) -> Result<&'a Mapping> {
    match untag(value) {
        Value::Mapping(map) => Ok(map),
        other => Err(SchemaError::new(
            path,
            format!("expected a mapping, found {}", kind(other)),
        )),
    }
}

fn optional_mapping<'a>(value: Option<&'a Value>, path: &str) -> Result<Option<&'a Mapping>> {
    match value.map(untag) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => require_mapping(v, path).map(Some),
    }
}

fn sequence<'a>(value: Option<&'a Value>, path: &str) -> Result<Vec<&'a Value>> {
    match value.map(untag) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(items)) => Ok(items.iter().collect()),
        Some(Value::Mapping(_)) => Err(SchemaError::new(
            path,
            "expected a sequence, found a mapping",
        )),
        Some(scalar) => Ok(vec![scalar]),
    }
}

fn key_text(key: &Value, path: &str) -> Result<String> {
    scalar_text(key, path)
}

/// Coerce a scalar to text.
fn scalar_text(value: &Value, path: &str) -> Result<String> {
    match untag(value) {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        other => Err(SchemaError::new(
            path,
            format!("expected text, found {}", kind(other)),
        )),
    }
}

/// Like [`scalar_text`], but collections are kept as compact JSON.
///
/// Used for test inputs and outputs, which may legitimately be structured.
fn inline_text(value: &Value, path: &str) -> Result<String> {
    match untag(value) {
        v @ (Value::Sequence(_) | Value::Mapping(_)) => serde_json::to_string(v)
            .map_err(|e| SchemaError::new(path, format!("cannot inline value: {}", e))),
        v => scalar_text(v, path),
    }
}

fn inline_field(map: &Mapping, key: &str, path: &str) -> Result<String> {
    match map.get(key) {
        None => Ok(UNSPECIFIED.to_string()),
        Some(v) => inline_text(v, &child(path, key)),
    }
}

fn text_field(map: &Mapping, key: &str, path: &str) -> Result<String> {
    match map.get(key) {
        None => Ok(String::new()),
        Some(v) => scalar_text(v, &child(path, key)),
    }
}

fn required_text(map: &Mapping, key: &str, path: &str) -> Result<String> {
    match map.get(key).map(untag) {
        None | Some(Value::Null) => Err(SchemaError::new(
            child(path, key),
            "required field is missing",
        )),
        Some(v) => scalar_text(v, &child(path, key)),
    }
}

/// Coerce to a list of text, promoting a scalar to a one-element list.
fn text_list(value: Option<&Value>, path: &str) -> Result<Vec<String>> {
    match value.map(untag) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| scalar_text(item, &index(path, i)))
            .collect(),
        Some(v) => Ok(vec![scalar_text(v, path)?]),
    }
}

fn list_of(body: Option<&Mapping>, key: &str, path: &str) -> Result<Vec<String>> {
    text_list(body.and_then(|m| m.get(key)), &child(path, key))
}

/// Decode `category -> text[]`.
///
/// A plain list (or scalar) becomes the single category `default_name`.
/// Nested maps flatten into dotted names (`padding_rules.one_byte`).
fn categories(value: Option<&Value>, path: &str, default_name: &str) -> Result<Vec<Category>> {
    match value.map(untag) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Mapping(map)) => {
            let mut out = Vec::new();
            flatten_categories(map, "", path, &mut out)?;
            Ok(out)
        }
        Some(v) => Ok(vec![Category::new(default_name, text_list(Some(v), path)?)]),
    }
}

fn flatten_categories(
    map: &Mapping,
    prefix: &str,
    path: &str,
    out: &mut Vec<Category>,
) -> Result<()> {
    for (key, value) in map {
        let key = key_text(key, path)?;
        let name = child(prefix, &key);
        let value_path = child(path, &key);
        match untag(value) {
            Value::Mapping(inner) => flatten_categories(inner, &name, &value_path, out)?,
            v => out.push(Category::new(name, text_list(Some(v), &value_path)?)),
        }
    }
    Ok(())
}

/// Decode `key -> text`, e.g. complexity notes.
fn pairs(value: Option<&Value>, path: &str, default_key: &str) -> Result<Vec<(String, String)>> {
    match value.map(untag) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Mapping(map)) => map
            .iter()
            .map(|(k, v)| {
                let key = key_text(k, path)?;
                let text = scalar_text(v, &child(path, &key))?;
                Ok((key, text))
            })
            .collect(),
        Some(v) => Ok(vec![(default_key.to_string(), scalar_text(v, path)?)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Result<SpecDocument> {
        let tree: Value = serde_yaml::from_str(yaml).unwrap();
        normalize(&tree)
    }

    const MINIMAL: &str = "metadata:\n  name: demo\n  version: '1.0'\n";

    #[test]
    fn missing_metadata_is_schema_error() {
        let err = doc("algorithms: {}\n").unwrap_err();
        assert_eq!(err.path, "metadata");
    }

    #[test]
    fn empty_document_is_schema_error() {
        let err = doc("").unwrap_err();
        assert_eq!(err.path, "metadata");
    }

    #[test]
    fn metadata_requires_name() {
        let err = doc("metadata:\n  version: 1\n").unwrap_err();
        assert_eq!(err.path, "metadata.name");
    }

    #[test]
    fn minimal_document_normalizes() {
        let d = doc(MINIMAL).unwrap();
        assert_eq!(d.metadata.name, "demo");
        assert_eq!(d.metadata.version, "1.0");
        assert!(d.registers.is_empty());
        assert!(d.extensions.is_empty());
    }

    #[test]
    fn numeric_version_coerces_to_text() {
        let d = doc("metadata:\n  name: demo\n  version: 2\n  license: MIT\n").unwrap();
        assert_eq!(d.metadata.version, "2");
        assert_eq!(d.metadata.extra, vec![("license".to_string(), "MIT".to_string())]);
    }

    #[test]
    fn scalar_promotes_to_single_element_list() {
        let d = doc(&format!(
            "{MINIMAL}register_usage:\n  - name: rax\n    purpose: accumulator\n    constraints: caller saved\n"
        ))
        .unwrap();
        assert_eq!(d.registers[0].constraints, vec!["caller saved".to_string()]);
    }

    #[test]
    fn register_usage_accepts_general_purpose_wrapper() {
        let d = doc(&format!(
            "{MINIMAL}register_usage:\n  general_purpose:\n    - name: rax\n      purpose: acc\n      byte_regs: [al]\n"
        ))
        .unwrap();
        assert_eq!(d.registers[0].name, "rax");
        assert_eq!(d.registers[0].byte_regs, vec!["al".to_string()]);
        assert_eq!(d.registers[0].path, "register_usage.general_purpose[0]");
    }

    #[test]
    fn structures_accept_map_and_list_forms() {
        let map_form = doc(&format!(
            "{MINIMAL}structures:\n  DataBuffer:\n    documentation: buffer\n    fields:\n      - name: len\n        type: u64\n"
        ))
        .unwrap();
        assert_eq!(map_form.structures[0].name, "DataBuffer");
        assert_eq!(map_form.structures[0].path, "structures.DataBuffer");
        assert_eq!(map_form.structures[0].fields[0].field_type, "u64");

        let list_form = doc(&format!(
            "{MINIMAL}structures:\n  - name: DataBuffer\n  - name: DataBuffer\n"
        ))
        .unwrap();
        assert_eq!(list_form.structures.len(), 2);
        assert_eq!(list_form.structures[1].path, "structures[1]");
    }

    #[test]
    fn data_structures_merge_after_structures() {
        let d = doc(&format!(
            "{MINIMAL}structures:\n  - name: DataBuffer\ndata_structures:\n  - name: DataBuffer\n  - name: Table\n"
        ))
        .unwrap();
        let paths: Vec<_> = d.structures.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["structures[0]", "data_structures[0]", "data_structures[1]"]
        );
    }

    #[test]
    fn structure_complexity_is_kept() {
        let d = doc(&format!(
            "{MINIMAL}structures:\n  Buf:\n    complexity: {{append: O(1)}}\n  Table:\n    complexity: O(log n)\n"
        ))
        .unwrap();
        assert_eq!(
            d.structures[0].complexity,
            vec![("append".to_string(), "O(1)".to_string())]
        );
        assert_eq!(
            d.structures[1].complexity,
            vec![("overall".to_string(), "O(log n)".to_string())]
        );
    }

    #[test]
    fn algorithm_examples_are_kept() {
        let d = doc(&format!(
            "{MINIMAL}algorithms:\n  encode:\n    examples:\n      - {{input: f, output: Zg==}}\n      - Empty in, empty out\n"
        ))
        .unwrap();
        let examples = &d.algorithms[0].examples;
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0][1], ("output".to_string(), "Zg==".to_string()));
        assert_eq!(
            examples[1],
            vec![("example".to_string(), "Empty in, empty out".to_string())]
        );
    }

    #[test]
    fn field_requires_type() {
        let err = doc(&format!(
            "{MINIMAL}structures:\n  Buf:\n    fields:\n      - name: len\n"
        ))
        .unwrap_err();
        assert_eq!(err.path, "structures.Buf.fields[0].type");
    }

    #[test]
    fn implementation_requirements_flatten_nested_maps() {
        let d = doc(&format!(
            "{MINIMAL}algorithms:\n  encode:\n    implementation_requirements:\n      memory_operations: [load]\n      padding_rules:\n        one_byte: [pad twice]\n"
        ))
        .unwrap();
        let names: Vec<_> = d.algorithms[0]
            .implementation_requirements
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["memory_operations", "padding_rules.one_byte"]);
    }

    #[test]
    fn step_list_becomes_main_phase() {
        let d = doc(&format!("{MINIMAL}algorithms:\n  encode:\n    steps: [a, b]\n")).unwrap();
        assert_eq!(d.algorithms[0].steps[0].name, "main");
        assert_eq!(d.algorithms[0].steps[0].items.len(), 2);
    }

    #[test]
    fn bare_error_type_gets_defaults() {
        let d = doc(&format!(
            "{MINIMAL}error_handling:\n  strategies: [log and exit]\n  error_types:\n    - padding_error\n"
        ))
        .unwrap();
        let et = &d.error_handling.error_types[0];
        assert_eq!(et.description, "Handle padding_error");
        assert_eq!(et.handling, vec!["Detect", "Log", "Handle"]);
        assert_eq!(d.error_handling.strategies[0].name, "general");
    }

    #[test]
    fn region_size_literal_and_symbol() {
        let d = doc(&format!(
            "{MINIMAL}section_requirements:\n  bss:\n    variables:\n      - name: buf\n        size: BUF_SIZE\n        align: 16\n      - name: tmp\n        size: '0x100'\n"
        ))
        .unwrap();
        let bss = &d.section_requirements.bss;
        assert_eq!(bss[0].size, RegionSize::Symbol("BUF_SIZE".into()));
        assert_eq!(bss[0].align, Some(16));
        assert_eq!(bss[0].path, "section_requirements.bss.variables[0]");
        assert_eq!(bss[1].size, RegionSize::Literal(256));
        assert_eq!(bss[1].align, None);
    }

    #[test]
    fn non_numeric_size_is_schema_error() {
        let err = doc(&format!(
            "{MINIMAL}section_requirements:\n  bss:\n    - name: buf\n      size: 12 bytes\n"
        ))
        .unwrap_err();
        assert_eq!(err.path, "section_requirements.bss[0].size");
    }

    #[test]
    fn non_numeric_align_is_schema_error() {
        let err = doc(&format!(
            "{MINIMAL}section_requirements:\n  bss:\n    - name: buf\n      size: 16\n      align: wide\n"
        ))
        .unwrap_err();
        assert_eq!(err.path, "section_requirements.bss[0].align");
    }

    #[test]
    fn conformance_vectors_keep_missing_keys() {
        let d = doc(&format!(
            "{MINIMAL}testing:\n  conformance_tests:\n    - standard: RFC 4648\n      test_vectors:\n        - input: ''\n          output: ''\n        - output: Zg==\n    - RFC 2045\n"
        ))
        .unwrap();
        let vectors = &d.testing.conformance_tests[0].test_vectors;
        assert_eq!(vectors[0].input.as_deref(), Some(""));
        assert_eq!(vectors[1].input, None);
        assert_eq!(vectors[1].output.as_deref(), Some("Zg=="));
        assert_eq!(d.testing.conformance_tests[1].standard, "RFC 2045");
    }

    #[test]
    fn unit_tests_accept_bare_names() {
        let d = doc(&format!(
            "{MINIMAL}testing:\n  unit_tests:\n    - empty input\n    - name: one byte\n      input: f\n      expected_output: Zg==\n      validation: output is padded\n"
        ))
        .unwrap();
        let tests = &d.testing.unit_tests;
        assert_eq!(tests[0].input, "TBD");
        assert_eq!(tests[1].validation, vec!["output is padded".to_string()]);
    }

    #[test]
    fn integration_test_details_are_kept() {
        let d = doc(&format!(
            "{MINIMAL}testing:\n  integration_tests:\n    - name: pipe\n      steps: [write, read]\n      validation: matches\n"
        ))
        .unwrap();
        let test = &d.testing.integration_tests[0];
        assert_eq!(test.details, vec![Category::new("steps", vec!["write".into(), "read".into()])]);
        assert_eq!(test.validation, vec!["matches".to_string()]);
    }

    #[test]
    fn unknown_top_level_keys_pass_through() {
        let d = doc(&format!("{MINIMAL}x_vendor:\n  anything: [1, 2]\n")).unwrap();
        assert_eq!(d.extensions.len(), 1);
        assert_eq!(d.extensions[0].0, "x_vendor");
    }

    #[test]
    fn map_where_text_expected_is_schema_error() {
        let err = doc(&format!(
            "{MINIMAL}performance:\n  constraints:\n    - nested: map\n"
        ))
        .unwrap_err();
        assert_eq!(err.path, "performance.constraints[0]");
    }

    #[test]
    fn normalization_is_deterministic() {
        let yaml = format!(
            "{MINIMAL}algorithms:\n  encode:\n    steps:\n      main_loop: [load rax]\n"
        );
        assert_eq!(doc(&yaml).unwrap(), doc(&yaml).unwrap());
    }
}
