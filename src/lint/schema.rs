//! JSON Schema generation for specification documents.
//!
//! This module generates a JSON Schema (Draft-07) for the input document
//! format, enabling IDE autocomplete and validation. The schema mirrors the
//! shapes the normalizer accepts, including the loose ones (bare strings
//! for named entries, scalars where lists are expected).

use serde_json::{json, Value};

/// Generates JSON Schema for specification documents.
pub struct SchemaGenerator;

impl SchemaGenerator {
    /// Create a new schema generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate the complete JSON Schema for a specification document.
    pub fn generate(&self) -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "$id": "https://specforge.dev/schemas/document.json",
            "title": "SpecForge Document",
            "description": "Semi-structured specification of an assembly program",
            "type": "object",
            "required": ["metadata"],
            "properties": {
                "metadata": self.metadata_schema(),
                "header_format": self.header_format_schema(),
                "register_usage": self.register_usage_schema(),
                "structures": self.structures_schema(),
                "data_structures": { "$ref": "#/properties/structures" },
                "algorithms": self.algorithms_schema(),
                "error_handling": self.error_handling_schema(),
                "section_requirements": self.section_requirements_schema(),
                "performance": self.performance_schema(),
                "testing": self.testing_schema(),
                "code_style": categories("Style rules by category")
            },
            "additionalProperties": true
        })
    }

    fn metadata_schema(&self) -> Value {
        json!({
            "type": "object",
            "description": "Document identity",
            "required": ["name", "version"],
            "properties": {
                "name": { "type": "string" },
                "version": { "type": ["string", "number"] },
                "description": { "type": "string" },
                "tags": text_list("Free-form tags"),
                "authors": text_list("Document authors")
            }
        })
    }

    fn header_format_schema(&self) -> Value {
        json!({
            "type": "object",
            "description": "Header of the generated source file",
            "properties": {
                "border_line": { "type": "string" },
                "file_name_line": { "type": "string" },
                "description_line": { "type": "string" },
                "blank_comment": { "type": "string" },
                "assembly_lines": text_list("Lines emitted after the header"),
                "directives": text_list(
                    "Assembler directives; `NAME equ V`, `%define NAME V` and similar define constants"
                )
            }
        })
    }

    fn register_usage_schema(&self) -> Value {
        let entry = json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": { "type": "string" },
                "purpose": { "type": "string" },
                "byte_regs": text_list("Sub-register aliases"),
                "constraints": text_list("Usage constraints")
            }
        });
        json!({
            "description": "Declared registers",
            "oneOf": [
                { "type": "array", "items": entry },
                {
                    "type": "object",
                    "properties": {
                        "general_purpose": { "type": "array", "items": entry }
                    }
                }
            ]
        })
    }

    fn structures_schema(&self) -> Value {
        named_collection(
            "Declared data structures",
            json!({
                "fields": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["name"],
                        "properties": {
                            "name": { "type": "string" },
                            "type": { "type": "string" },
                            "description": { "type": "string" },
                            "constraints": text_list("Field constraints")
                        }
                    }
                },
                "constraints": text_list("Structure constraints"),
                "documentation": { "type": "string" },
                "examples": text_list("Usage examples"),
                "complexity": {
                    "type": ["object", "string"],
                    "additionalProperties": { "type": "string" }
                }
            }),
        )
    }

    fn algorithms_schema(&self) -> Value {
        named_collection(
            "Declared algorithms",
            json!({
                "description": { "type": "string" },
                "implementation_requirements": categories("Requirements by category"),
                "steps": categories("Steps by phase"),
                "complexity": {
                    "type": ["object", "string"],
                    "additionalProperties": { "type": "string" }
                },
                "edge_cases": text_list("Edge cases the implementation must handle"),
                "preconditions": text_list("Preconditions"),
                "postconditions": text_list("Postconditions"),
                "invariants": text_list("Invariants"),
                "examples": {
                    "type": "array",
                    "items": {
                        "type": ["object", "string"],
                        "additionalProperties": { "type": "string" }
                    }
                }
            }),
        )
    }

    fn error_handling_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "strategies": categories("Error handling strategies"),
                "error_types": named_collection(
                    "Declared error types",
                    json!({
                        "description": { "type": "string" },
                        "handling": text_list("Handling steps")
                    })
                ),
                "syscall_requirements": text_list("System call error requirements")
            }
        })
    }

    fn section_requirements_schema(&self) -> Value {
        let region = json!({
            "type": "object",
            "required": ["name", "size"],
            "properties": {
                "name": { "type": "string" },
                "size": {
                    "type": ["integer", "string"],
                    "description": "Integer literal or symbolic constant name"
                },
                "align": {
                    "type": ["integer", "string"],
                    "description": "Power-of-two alignment"
                },
                "purpose": { "type": "string" }
            }
        });
        json!({
            "type": "object",
            "properties": {
                "data": text_list("Initialized data requirements"),
                "bss": {
                    "oneOf": [
                        { "type": "array", "items": region },
                        {
                            "type": "object",
                            "properties": {
                                "variables": { "type": "array", "items": region }
                            }
                        }
                    ]
                },
                "text": categories("Code section requirements")
            }
        })
    }

    fn performance_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "time_complexity": { "type": "string" },
                "space_complexity": { "type": "string" },
                "constraints": text_list("Performance constraints"),
                "register_usage": text_list("Register usage guidance"),
                "memory_access": text_list("Memory access guidance"),
                "benchmarks": named_collection(
                    "Benchmarks",
                    json!({
                        "input_size": { "type": ["string", "number"] },
                        "expected_time": { "type": ["string", "number"] },
                        "requirements": text_list("Benchmark requirements")
                    })
                )
            }
        })
    }

    fn testing_schema(&self) -> Value {
        let named = |properties: Value| {
            json!({
                "type": "array",
                "items": {
                    "oneOf": [
                        { "type": "string" },
                        { "type": "object", "required": ["name"], "properties": properties }
                    ]
                }
            })
        };
        json!({
            "type": "object",
            "properties": {
                "unit_tests": named(json!({
                    "name": { "type": "string" },
                    "input": {},
                    "expected_output": {},
                    "validation": text_list("Validation steps")
                })),
                "integration_tests": named(json!({
                    "name": { "type": "string" },
                    "validation": text_list("Validation steps")
                })),
                "conformance_tests": {
                    "type": "array",
                    "items": {
                        "oneOf": [
                            { "type": "string" },
                            {
                                "type": "object",
                                "properties": {
                                    "standard": { "type": "string" },
                                    "test_vectors": {
                                        "type": "array",
                                        "items": {
                                            "type": "object",
                                            "required": ["input", "output"],
                                            "properties": {
                                                "input": {},
                                                "output": {}
                                            }
                                        }
                                    }
                                }
                            }
                        ]
                    }
                }
            }
        })
    }
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn text_list(description: &str) -> Value {
    json!({
        "description": description,
        "oneOf": [
            { "type": "array", "items": { "type": ["string", "number", "boolean"] } },
            { "type": ["string", "number", "boolean"] }
        ]
    })
}

fn categories(description: &str) -> Value {
    json!({
        "description": description,
        "oneOf": [
            { "type": "object" },
            { "type": "array", "items": { "type": "string" } }
        ]
    })
}

/// Map keyed by name, or a list of objects with `name` (or bare names).
fn named_collection(description: &str, properties: Value) -> Value {
    let mut with_name = properties.clone();
    if let Value::Object(ref mut map) = with_name {
        map.insert("name".to_string(), json!({ "type": "string" }));
    }
    json!({
        "description": description,
        "oneOf": [
            {
                "type": "object",
                "additionalProperties": {
                    "oneOf": [
                        { "type": "null" },
                        { "type": "object", "properties": properties }
                    ]
                }
            },
            {
                "type": "array",
                "items": {
                    "oneOf": [
                        { "type": "string" },
                        { "type": "object", "required": ["name"], "properties": with_name }
                    ]
                }
            }
        ]
    })
}
