//! Prose collection and the reference index.
//!
//! Every free-text field a rule might inspect is gathered once, in
//! document order, together with its dotted path and the kind of field it
//! came from. The [`ReferenceIndex`] then records each identifier-shaped
//! mention as a `(domain, identifier, path)` edge.

use std::collections::HashSet;

use super::symbols::SymbolTable;
use super::tokenize;
use crate::document::path::{child, index};
use crate::document::{Category, SpecDocument};

/// Where a piece of prose came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProseOrigin {
    AlgorithmDescription,
    ImplementationRequirement,
    Step,
    Complexity,
    EdgeCase,
    Precondition,
    Postcondition,
    Invariant,
    ErrorStrategy,
    SyscallRequirement,
    SectionData,
    SectionText,
    RegionPurpose,
    Performance,
}

impl ProseOrigin {
    pub fn is_algorithm(self) -> bool {
        matches!(
            self,
            ProseOrigin::AlgorithmDescription
                | ProseOrigin::ImplementationRequirement
                | ProseOrigin::Step
                | ProseOrigin::Complexity
                | ProseOrigin::EdgeCase
                | ProseOrigin::Precondition
                | ProseOrigin::Postcondition
                | ProseOrigin::Invariant
        )
    }

    pub fn is_section(self) -> bool {
        matches!(
            self,
            ProseOrigin::SectionData | ProseOrigin::SectionText | ProseOrigin::RegionPurpose
        )
    }

    pub fn is_performance(self) -> bool {
        self == ProseOrigin::Performance
    }
}

/// One prose field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prose<'a> {
    pub origin: ProseOrigin,
    pub path: String,
    pub text: &'a str,
}

/// Gather all prose fields of a document in document order.
pub fn collect_prose(doc: &SpecDocument) -> Vec<Prose<'_>> {
    let mut sink = ProseSink::default();

    for alg in &doc.algorithms {
        let p = &alg.path;
        sink.text(ProseOrigin::AlgorithmDescription, child(p, "description"), &alg.description);
        sink.categories(
            ProseOrigin::ImplementationRequirement,
            &child(p, "implementation_requirements"),
            &alg.implementation_requirements,
        );
        sink.categories(ProseOrigin::Step, &child(p, "steps"), &alg.steps);
        let complexity = child(p, "complexity");
        for (key, text) in &alg.complexity {
            sink.text(ProseOrigin::Complexity, child(&complexity, key), text);
        }
        sink.list(ProseOrigin::EdgeCase, &child(p, "edge_cases"), &alg.edge_cases);
        sink.list(ProseOrigin::Precondition, &child(p, "preconditions"), &alg.preconditions);
        sink.list(ProseOrigin::Postcondition, &child(p, "postconditions"), &alg.postconditions);
        sink.list(ProseOrigin::Invariant, &child(p, "invariants"), &alg.invariants);
    }

    let eh = &doc.error_handling;
    sink.categories(ProseOrigin::ErrorStrategy, "error_handling.strategies", &eh.strategies);
    sink.list(
        ProseOrigin::SyscallRequirement,
        "error_handling.syscall_requirements",
        &eh.syscall_requirements,
    );

    let sections = &doc.section_requirements;
    sink.list(ProseOrigin::SectionData, "section_requirements.data", &sections.data);
    for region in &sections.bss {
        sink.text(ProseOrigin::RegionPurpose, child(&region.path, "purpose"), &region.purpose);
    }
    sink.categories(ProseOrigin::SectionText, "section_requirements.text", &sections.text);

    let perf = &doc.performance;
    let origin = ProseOrigin::Performance;
    sink.text(origin, "performance.time_complexity".into(), &perf.time_complexity);
    sink.text(origin, "performance.space_complexity".into(), &perf.space_complexity);
    sink.list(origin, "performance.constraints", &perf.constraints);
    sink.list(origin, "performance.register_usage", &perf.register_usage);
    sink.list(origin, "performance.memory_access", &perf.memory_access);
    for bench in &perf.benchmarks {
        sink.list(origin, &child(&bench.path, "requirements"), &bench.requirements);
    }

    sink.out
}

#[derive(Default)]
struct ProseSink<'a> {
    out: Vec<Prose<'a>>,
}

impl<'a> ProseSink<'a> {
    fn text(&mut self, origin: ProseOrigin, path: String, text: &'a str) {
        if !text.trim().is_empty() {
            self.out.push(Prose { origin, path, text });
        }
    }

    fn list(&mut self, origin: ProseOrigin, base: &str, items: &'a [String]) {
        for (i, text) in items.iter().enumerate() {
            self.text(origin, index(base, i), text);
        }
    }

    fn categories(&mut self, origin: ProseOrigin, base: &str, categories: &'a [Category]) {
        for category in categories {
            self.list(origin, &child(base, &category.name), &category.items);
        }
    }
}

/// Identifier domain of a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Register,
    Structure,
    ErrorType,
    Constant,
}

/// A mention of an identifier inside prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub domain: Domain,
    /// The identifier as written (registers are lowercased).
    pub identifier: String,
    pub path: String,
    pub origin: ProseOrigin,
    /// Whether the identifier resolves to a declaration.
    pub declared: bool,
}

/// All identifier mentions in a document, in discovery order.
///
/// The same identifier is recorded at most once per prose field.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    references: Vec<Reference>,
}

impl ReferenceIndex {
    /// Scan every prose field of `doc` against `symbols`.
    pub fn build(doc: &SpecDocument, symbols: &SymbolTable) -> Self {
        let mut index = Self::default();
        let mut seen: HashSet<(Domain, String, String)> = HashSet::new();

        for prose in collect_prose(doc) {
            let mut found: Vec<(usize, Domain, String, bool)> = Vec::new();

            for word in tokenize::words(prose.text) {
                let segment_override = tokenize::is_segment_register(word.text)
                    && prose.text[word.start + word.text.len()..].starts_with(':');
                if let Some((domain, identifier, declared)) =
                    classify(word.text, segment_override, symbols)
                {
                    found.push((word.start, domain, identifier, declared));
                }
            }
            for phrase in symbols.structure_phrases() {
                if let Some(at) = tokenize::contains_phrase(prose.text, phrase, false) {
                    found.push((at, Domain::Structure, phrase.clone(), true));
                }
            }
            for phrase in symbols.error_type_phrases() {
                if let Some(at) = tokenize::contains_phrase(prose.text, phrase, false) {
                    found.push((at, Domain::ErrorType, phrase.clone(), true));
                }
            }
            found.sort_by_key(|(at, ..)| *at);

            for (_, domain, identifier, declared) in found {
                if seen.insert((domain, identifier.clone(), prose.path.clone())) {
                    index.references.push(Reference {
                        domain,
                        identifier,
                        path: prose.path.clone(),
                        origin: prose.origin,
                        declared,
                    });
                }
            }
        }

        tracing::debug!(references = index.references.len(), "Indexed prose references");
        index
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.references.iter()
    }

    /// References in one domain.
    pub fn in_domain(&self, domain: Domain) -> impl Iterator<Item = &Reference> {
        self.references.iter().filter(move |r| r.domain == domain)
    }

    /// Mentions of a declared identifier.
    pub fn mentions<'a>(
        &'a self,
        domain: Domain,
        identifier: &'a str,
    ) -> impl Iterator<Item = &'a Reference> {
        self.in_domain(domain).filter(move |r| r.identifier == identifier)
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

// Declared names win over shape heuristics; a word lands in at most one
// domain. Segment registers only count when declared or written as an
// override such as `fs:0x28`.
fn classify(
    word: &str,
    segment_override: bool,
    symbols: &SymbolTable,
) -> Option<(Domain, String, bool)> {
    if symbols.has_error_type(word) {
        return Some((Domain::ErrorType, word.to_string(), true));
    }
    if symbols.has_structure(word) {
        return Some((Domain::Structure, word.to_string(), true));
    }
    if symbols.has_constant(word) {
        return Some((Domain::Constant, word.to_string(), true));
    }
    if symbols.looks_like_register(word) || segment_override {
        let name = word.to_ascii_lowercase();
        let declared = symbols.has_register(&name);
        return Some((Domain::Register, name, declared));
    }
    if tokenize::is_error_type_candidate(word) {
        return Some((Domain::ErrorType, word.to_string(), false));
    }
    if tokenize::is_structure_candidate(word) && !symbols.is_known_identifier(word) {
        return Some((Domain::Structure, word.to_string(), false));
    }
    if tokenize::is_constant_candidate(word) {
        return Some((Domain::Constant, word.to_string(), false));
    }
    None
}
