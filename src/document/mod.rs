//! Specification documents: loading, the typed model, and normalization.
//!
//! This module handles everything up to a validated-ready document:
//! - Raw loading into a generic tree in [`loader`]
//! - The typed document model in [`schema`]
//! - Coercion from tree to model in [`normalize`]
//! - Symbolic constants declared by header directives in [`constants`]
//! - Dotted source locators in [`path`]
//!
//! # Example
//!
//! ```
//! use specforge::document::{normalize, parse_document};
//! use std::path::Path;
//!
//! let tree = parse_document(
//!     "metadata:\n  name: base64\n  version: '1.0'\n",
//!     Path::new("base64.yml"),
//! )
//! .unwrap();
//! let doc = normalize(&tree).unwrap();
//! assert_eq!(doc.metadata.name, "base64");
//! ```

pub mod constants;
pub mod loader;
pub mod normalize;
pub mod path;
pub mod schema;

pub use constants::{parse_int_literal, ConstantDef, ConstantTable};
pub use loader::{load_document_file, parse_document};
pub use normalize::normalize;
pub use schema::{
    find_category, Algorithm, Benchmark, Category, CodeStyle, ConformanceTest, ErrorHandling,
    ErrorType, Example, Field, HeaderFormat, IntegrationTest, Metadata, Performance, RegionSize,
    RegionSpec, RegisterEntry, SectionRequirements, SpecDocument, Structure, TestVector, Testing,
    UnitTest,
};
