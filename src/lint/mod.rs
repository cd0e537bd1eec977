//! Cross-reference validation.
//!
//! This module checks a normalized document for internal consistency
//! through a pluggable rule-based system.
//!
//! # Overview
//!
//! The lint system consists of:
//!
//! - **Tokenizer** - Identifier heuristics for prose ([`tokenize`])
//! - **Symbols** - Declared names per identifier domain ([`SymbolTable`])
//! - **References** - Identifier mentions found in prose ([`ReferenceIndex`])
//! - **Rules** - Individual validation checks ([`LintRule`] trait)
//! - **Registry** - Collection of all available rules ([`RuleRegistry`])
//! - **Diagnostics** - Issue reports with severity and suggestions ([`LintDiagnostic`])
//!
//! # Example
//!
//! ```
//! use specforge::lint::{RuleRegistry, RuleId, Severity};
//!
//! let registry = RuleRegistry::with_builtins();
//! assert_eq!(registry.len(), 8);
//! assert!(registry.get(&RuleId::new("R1")).is_some());
//!
//! // Severity has ordering
//! assert!(Severity::Warning < Severity::Error);
//! ```

pub mod diagnostic;
pub mod output;
pub mod references;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod schema;
pub mod symbols;
pub mod tokenize;
pub mod validator;

pub use diagnostic::{LintDiagnostic, RelatedInfo};
pub use output::{
    DocumentDiagnostics, HumanFormatter, JsonFormatter, LintFormatter, OutputFormat,
    SarifFormatter,
};
pub use references::{collect_prose, Domain, Prose, ProseOrigin, Reference, ReferenceIndex};
pub use registry::RuleRegistry;
pub use rule::{DiagnosticKind, LintRule, RuleId, Severity};
pub use rules::{
    AlignmentRule, ConformanceVectorRule, ConstantResolutionRule, DuplicateIdentifierRule,
    EdgeCaseCoverageRule, ErrorTypeConsistencyRule, RegisterClosureRule, StructureClosureRule,
};
pub use schema::SchemaGenerator;
pub use symbols::SymbolTable;
pub use validator::{validate, ValidationContext, Validator};
