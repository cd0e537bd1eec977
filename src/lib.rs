//! SpecForge - Cross-reference validation and canonical rendering of
//! assembly program specifications.
//!
//! SpecForge reads a loosely structured YAML or JSON description of an
//! assembly program, normalizes it into a typed model, checks that the
//! prose in one section agrees with the declarations in another, and
//! renders a fixed-order text artifact for downstream code generation.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`document`] - Loading, the typed model, and normalization
//! - [`error`] - Error types and result aliases
//! - [`lint`] - Validation rules, diagnostics and report formatters
//! - [`pipeline`] - Single-document and batch processing
//! - [`render`] - Canonical text and YAML rendering
//! - [`report`] - Validation reports
//! - [`settings`] - Tool settings
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use specforge::document::parse_document;
//! use specforge::pipeline::Pipeline;
//! use std::path::Path;
//!
//! let tree = parse_document(
//!     "metadata: {name: demo, version: '1.0'}\nregister_usage: [rax]\n",
//!     Path::new("demo.yml"),
//! )
//! .unwrap();
//! let forged = Pipeline::default().forge(&tree).unwrap();
//! assert!(forged.report.is_valid());
//! assert!(forged.artifact.unwrap().text.contains("Register: rax"));
//! ```

pub mod cli;
pub mod document;
pub mod error;
pub mod lint;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod settings;
pub mod ui;

pub use error::{Result, SpecForgeError};
