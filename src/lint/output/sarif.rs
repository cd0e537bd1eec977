//! SARIF output formatter.
//!
//! SARIF (Static Analysis Results Interchange Format) is an OASIS standard
//! for static analysis tools, supported by GitHub, VS Code, and other tools.
//! Diagnostics point at document nodes rather than lines, so each result
//! carries the input file as a physical location and the dotted path as a
//! logical location.

use super::{DocumentDiagnostics, LintFormatter};
use crate::lint::{RuleRegistry, Severity};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

/// SARIF version we generate.
const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";

/// Rule id used for documents that failed to load or normalize.
const LOAD_FAILURE_RULE: &str = "load";

/// Formats lint output as SARIF.
pub struct SarifFormatter {
    /// Tool name to report.
    pub tool_name: String,
    /// Tool version to report.
    pub tool_version: String,
    descriptions: BTreeMap<String, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule {
    id: String,
    short_description: SarifMessage,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: &'static str,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    related_locations: Vec<SarifLocation>,
}

#[derive(Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: SarifPhysicalLocation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    logical_locations: Vec<SarifLogicalLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<SarifMessage>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
}

#[derive(Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLogicalLocation {
    fully_qualified_name: String,
    kind: &'static str,
}

impl SarifFormatter {
    /// Create a new SARIF formatter.
    pub fn new(tool_name: impl Into<String>, tool_version: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_version: tool_version.into(),
            descriptions: BTreeMap::new(),
        }
    }

    /// Use the descriptions of registered rules in the driver section.
    pub fn with_rules(mut self, registry: &RuleRegistry) -> Self {
        for rule in registry.iter() {
            self.descriptions
                .insert(rule.id().0, rule.description().to_string());
        }
        self
    }

    fn severity_to_level(severity: Severity) -> &'static str {
        match severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    fn location(source: &str, path: Option<&str>, message: Option<&str>) -> SarifLocation {
        SarifLocation {
            physical_location: SarifPhysicalLocation {
                artifact_location: SarifArtifactLocation {
                    uri: source.to_string(),
                },
            },
            logical_locations: path
                .map(|p| {
                    vec![SarifLogicalLocation {
                        fully_qualified_name: p.to_string(),
                        kind: "member",
                    }]
                })
                .unwrap_or_default(),
            message: message.map(|m| SarifMessage {
                text: m.to_string(),
            }),
        }
    }
}

impl LintFormatter for SarifFormatter {
    fn format<W: Write>(
        &self,
        documents: &[DocumentDiagnostics<'_>],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let mut results = Vec::new();
        // Sorted for stable output
        let mut rule_ids: BTreeSet<String> = BTreeSet::new();

        for doc in documents {
            if let Some(ref failure) = doc.failure {
                rule_ids.insert(LOAD_FAILURE_RULE.to_string());
                results.push(SarifResult {
                    rule_id: LOAD_FAILURE_RULE.to_string(),
                    level: "error",
                    message: SarifMessage {
                        text: failure.clone(),
                    },
                    locations: vec![Self::location(&doc.source, None, None)],
                    related_locations: Vec::new(),
                });
            }

            for d in doc.diagnostics {
                rule_ids.insert(d.rule_id.0.clone());
                results.push(SarifResult {
                    rule_id: d.rule_id.0.clone(),
                    level: Self::severity_to_level(d.severity),
                    message: SarifMessage {
                        text: d.message.clone(),
                    },
                    locations: vec![Self::location(&doc.source, Some(&d.path), None)],
                    related_locations: d
                        .related
                        .iter()
                        .map(|r| Self::location(&doc.source, Some(&r.path), Some(&r.message)))
                        .collect(),
                });
            }
        }

        let rules: Vec<_> = rule_ids
            .into_iter()
            .map(|id| {
                let text = match self.descriptions.get(&id) {
                    Some(description) => description.clone(),
                    None if id == LOAD_FAILURE_RULE => {
                        "Document could not be loaded or normalized".to_string()
                    }
                    None => format!("Rule {}", id),
                };
                SarifRule {
                    id,
                    short_description: SarifMessage { text },
                }
            })
            .collect();

        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: self.tool_name.clone(),
                        version: self.tool_version.clone(),
                        rules,
                    },
                },
                results,
            }],
        };

        serde_json::to_writer_pretty(&mut *writer, &log).map_err(std::io::Error::other)?;
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::lint::LintDiagnostic;

    fn render(formatter: &SarifFormatter, diagnostics: &[LintDiagnostic]) -> serde_json::Value {
        let documents = [DocumentDiagnostics {
            source: "base64.yml".into(),
            diagnostics,
            failure: None,
        }];
        let mut output = Vec::new();
        formatter.format(&documents, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn produces_valid_sarif() {
        let formatter = SarifFormatter::new("specforge", "1.0.0");
        let parsed = render(&formatter, &[undeclared_register()]);

        assert_eq!(parsed["version"], "2.1.0");
        assert!(parsed["runs"].is_array());
        assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "specforge");
    }

    #[test]
    fn maps_severity_to_sarif_level() {
        assert_eq!(SarifFormatter::severity_to_level(Severity::Error), "error");
        assert_eq!(
            SarifFormatter::severity_to_level(Severity::Warning),
            "warning"
        );
    }

    #[test]
    fn includes_rule_definitions_from_registry() {
        let formatter =
            SarifFormatter::new("specforge", "1.0.0").with_rules(&RuleRegistry::with_builtins());
        let parsed = render(&formatter, &[undeclared_register(), untested_edge_case()]);

        let rules = &parsed["runs"][0]["tool"]["driver"]["rules"];
        assert_eq!(rules.as_array().map(Vec::len), Some(2));
        assert_eq!(rules[0]["id"], "R1");
        assert_eq!(
            rules[0]["shortDescription"]["text"],
            "Registers mentioned in algorithm or performance text must be declared"
        );
    }

    #[test]
    fn logical_location_carries_dotted_path() {
        let formatter = SarifFormatter::new("specforge", "1.0.0");
        let parsed = render(&formatter, &[duplicate_structure()]);

        let result = &parsed["runs"][0]["results"][0];
        let location = &result["locations"][0];
        assert_eq!(
            location["physicalLocation"]["artifactLocation"]["uri"],
            "base64.yml"
        );
        assert_eq!(
            location["logicalLocations"][0]["fullyQualifiedName"],
            "structures[1]"
        );
        assert_eq!(
            result["relatedLocations"][0]["logicalLocations"][0]["fullyQualifiedName"],
            "structures[0]"
        );
    }

    #[test]
    fn load_failures_become_results() {
        let formatter = SarifFormatter::new("specforge", "1.0.0");
        let documents = [DocumentDiagnostics {
            source: "missing.yml".into(),
            diagnostics: &[],
            failure: Some("Document not found: missing.yml".into()),
        }];
        let mut output = Vec::new();
        formatter.format(&documents, &mut output).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(parsed["runs"][0]["results"][0]["ruleId"], "load");
        assert_eq!(parsed["runs"][0]["results"][0]["level"], "error");
    }
}
