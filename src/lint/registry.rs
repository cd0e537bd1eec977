//! Rule registry for managing lint rules.
//!
//! The [`RuleRegistry`] stores all available lint rules and provides
//! methods for registering, retrieving, and iterating over them. Rules are
//! kept in registration order, which is also the order diagnostics are
//! reported in.

use super::rule::{LintRule, RuleId};
use super::rules::{
    AlignmentRule, ConformanceVectorRule, ConstantResolutionRule, DuplicateIdentifierRule,
    EdgeCaseCoverageRule, ErrorTypeConsistencyRule, RegisterClosureRule, StructureClosureRule,
};

/// Registry of all available lint rules.
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a registry with all built-in rules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(RegisterClosureRule));
        registry.register(Box::new(StructureClosureRule));
        registry.register(Box::new(ErrorTypeConsistencyRule));
        registry.register(Box::new(ConstantResolutionRule));
        registry.register(Box::new(AlignmentRule));
        registry.register(Box::new(DuplicateIdentifierRule));
        registry.register(Box::new(EdgeCaseCoverageRule));
        registry.register(Box::new(ConformanceVectorRule));
        registry
    }

    /// Register a lint rule, replacing any rule with the same id.
    pub fn register(&mut self, rule: Box<dyn LintRule>) {
        let id = rule.id();
        match self.rules.iter().position(|r| r.id() == id) {
            Some(i) => self.rules[i] = rule,
            None => self.rules.push(rule),
        }
    }

    /// Get a rule by ID.
    pub fn get(&self, id: &RuleId) -> Option<&dyn LintRule> {
        self.rules.iter().find(|r| &r.id() == id).map(|r| r.as_ref())
    }

    /// Iterate over all rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn LintRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Get the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_new_is_empty() {
        let registry = RuleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn with_builtins_registers_eight_rules_in_order() {
        let registry = RuleRegistry::with_builtins();
        let ids: Vec<String> = registry.iter().map(|r| r.id().0).collect();
        assert_eq!(ids, ["R1", "R2", "R3", "R4", "R5", "R6", "R7", "R8"]);
    }

    #[test]
    fn registry_get_by_id() {
        let registry = RuleRegistry::with_builtins();
        let rule = registry.get(&RuleId::new("R4"));
        assert!(rule.is_some());
        assert_eq!(rule.map(|r| r.name()), Some("Constant Resolution"));
        assert!(registry.get(&RuleId::new("R9")).is_none());
    }

    #[test]
    fn register_replaces_same_id() {
        let mut registry = RuleRegistry::with_builtins();
        registry.register(Box::new(RegisterClosureRule));
        assert_eq!(registry.len(), 8);
    }
}
