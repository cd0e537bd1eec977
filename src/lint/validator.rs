//! Running the rule set over a document.

use rayon::prelude::*;
use std::time::Instant;

use super::diagnostic::LintDiagnostic;
use super::references::ReferenceIndex;
use super::registry::RuleRegistry;
use super::rule::LintRule;
use super::symbols::SymbolTable;
use crate::document::SpecDocument;
use crate::report::Report;
use crate::settings::ForgeSettings;

/// Read-only state shared by every rule during one validation.
#[derive(Debug)]
pub struct ValidationContext<'a> {
    pub doc: &'a SpecDocument,
    pub settings: &'a ForgeSettings,
    pub symbols: SymbolTable,
    pub references: ReferenceIndex,
}

impl<'a> ValidationContext<'a> {
    /// Build the symbol table and reference index for `doc`.
    pub fn new(doc: &'a SpecDocument, settings: &'a ForgeSettings) -> Self {
        let symbols = SymbolTable::build(doc, settings);
        let references = ReferenceIndex::build(doc, &symbols);
        Self {
            doc,
            settings,
            symbols,
            references,
        }
    }
}

/// Applies a rule registry to documents.
pub struct Validator {
    registry: RuleRegistry,
    parallel: bool,
}

impl Validator {
    pub fn new(registry: RuleRegistry) -> Self {
        Self {
            registry,
            parallel: true,
        }
    }

    /// A validator with the built-in rules R1 to R8.
    pub fn with_builtins() -> Self {
        Self::new(RuleRegistry::with_builtins())
    }

    /// Evaluate rules on the calling thread only.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Run every rule to completion and collect all findings.
    ///
    /// Diagnostics are grouped by rule id and keep discovery order within
    /// each rule, whether or not rules ran in parallel.
    pub fn validate(&self, doc: &SpecDocument, settings: &ForgeSettings) -> Report {
        let ctx = ValidationContext::new(doc, settings);
        let rules: Vec<&dyn LintRule> = self.registry.iter().collect();

        let per_rule: Vec<Vec<LintDiagnostic>> = if self.parallel && settings.parallel_rules {
            rules.par_iter().map(|rule| run_rule(*rule, &ctx)).collect()
        } else {
            rules.iter().map(|rule| run_rule(*rule, &ctx)).collect()
        };

        let mut diagnostics: Vec<LintDiagnostic> = per_rule.into_iter().flatten().collect();
        diagnostics.sort_by(|a, b| a.rule_id.cmp(&b.rule_id));

        let report = Report::new(diagnostics);
        tracing::debug!(
            document = %doc.metadata.name,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "Validation finished"
        );
        report
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn run_rule(rule: &dyn LintRule, ctx: &ValidationContext<'_>) -> Vec<LintDiagnostic> {
    let started = Instant::now();
    let diagnostics = rule.check(ctx);
    tracing::debug!(
        rule = %rule.id(),
        found = diagnostics.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "Rule finished"
    );
    diagnostics
}

/// Validate `doc` with the built-in rules.
pub fn validate(doc: &SpecDocument, settings: &ForgeSettings) -> Report {
    Validator::with_builtins().validate(doc, settings)
}
