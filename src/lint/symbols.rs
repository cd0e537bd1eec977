//! Per-domain sets of declared identifiers.

use std::collections::HashSet;

use super::tokenize;
use crate::document::{path, ConstantTable, SpecDocument};
use crate::settings::ForgeSettings;

/// Declared names of one document, grouped by identifier domain.
///
/// Register names compare case-insensitively; structure and error type
/// names compare exactly.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    registers: HashSet<String>,
    structures: HashSet<String>,
    structure_phrases: Vec<String>,
    error_types: HashSet<String>,
    error_type_phrases: Vec<String>,
    constants: ConstantTable,
    extra_registers: Vec<String>,
    known_identifiers: HashSet<String>,
}

impl SymbolTable {
    /// Build the table for a normalized document.
    pub fn build(doc: &SpecDocument, settings: &ForgeSettings) -> Self {
        let mut table = Self {
            constants: ConstantTable::from_directives(
                &doc.header_format.directives,
                &path::child("header_format", "directives"),
            ),
            extra_registers: settings.extra_registers.clone(),
            known_identifiers: settings.known_identifiers.iter().cloned().collect(),
            ..Self::default()
        };

        for reg in &doc.registers {
            table.add_register(&reg.name);
            for alias in &reg.byte_regs {
                table.add_register(alias);
            }
        }

        for structure in &doc.structures {
            insert_name(
                &structure.name,
                &mut table.structures,
                &mut table.structure_phrases,
            );
        }

        for error_type in &doc.error_handling.error_types {
            insert_name(
                &error_type.name,
                &mut table.error_types,
                &mut table.error_type_phrases,
            );
        }

        tracing::debug!(
            registers = table.registers.len(),
            structures = table.structures.len() + table.structure_phrases.len(),
            error_types = table.error_types.len() + table.error_type_phrases.len(),
            constants = table.constants.definitions().len(),
            "Built symbol table"
        );
        table
    }

    // A register entry may be written as `rax` or `rax/eax`; every
    // register-shaped word of the name counts as declared.
    fn add_register(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.registers.insert(name.to_ascii_lowercase());
        for word in tokenize::words(name) {
            if tokenize::is_register_name(word.text, &self.extra_registers) {
                self.registers.insert(word.text.to_ascii_lowercase());
            }
        }
    }

    /// Whether `token` is register-shaped (vocabulary, settings or declared).
    pub fn looks_like_register(&self, token: &str) -> bool {
        tokenize::is_register_name(token, &self.extra_registers) || self.has_register(token)
    }

    pub fn has_register(&self, name: &str) -> bool {
        self.registers.contains(&name.to_ascii_lowercase())
    }

    pub fn has_structure(&self, name: &str) -> bool {
        self.structures.contains(name)
    }

    pub fn has_error_type(&self, name: &str) -> bool {
        self.error_types.contains(name)
    }

    pub fn has_constant(&self, name: &str) -> bool {
        self.constants.is_defined(name)
    }

    /// Whether the name is exempt from structure detection.
    pub fn is_known_identifier(&self, name: &str) -> bool {
        self.known_identifiers.contains(name)
    }

    /// Declared structure names that are not single words.
    pub fn structure_phrases(&self) -> &[String] {
        &self.structure_phrases
    }

    /// Declared error type names that are not single words.
    pub fn error_type_phrases(&self) -> &[String] {
        &self.error_type_phrases
    }

    pub fn constants(&self) -> &ConstantTable {
        &self.constants
    }
}

fn insert_name(name: &str, words: &mut HashSet<String>, phrases: &mut Vec<String>) {
    let mut found = tokenize::words(name);
    match (found.next(), found.next()) {
        (Some(word), None) if word.text == name => {
            words.insert(name.to_string());
        }
        _ if !name.trim().is_empty() && !phrases.iter().any(|p| p == name) => {
            phrases.push(name.to_string());
        }
        _ => {}
    }
}
