//! Error types for SpecForge operations.
//!
//! This module defines [`SpecForgeError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - [`SchemaError`] is fatal for a single document and stops its pipeline
//!   before validation runs
//! - Validation findings are never errors; they are collected as
//!   diagnostics in a [`crate::report::Report`]
//! - [`SpecForgeError::RenderPrecondition`] signals a caller bug: the
//!   renderer was handed a document that still carries errors
//! - Use `anyhow::Error` (via `SpecForgeError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Structural or type failure raised while normalizing a document.
///
/// `path` is a dotted locator into the source document, e.g.
/// `section_requirements.bss[0].size`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema error at {path}: {message}")]
pub struct SchemaError {
    /// Dotted path of the offending node.
    pub path: String,
    /// Human-readable description of the failure.
    pub message: String,
}

impl SchemaError {
    /// Create a new schema error.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Core error type for SpecForge operations.
#[derive(Debug, Error)]
pub enum SpecForgeError {
    /// Input document not found at the given location.
    #[error("Document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    /// Failed to parse the raw document into a generic tree.
    #[error("Failed to parse document at {path}: {message}")]
    DocumentParseError { path: PathBuf, message: String },

    /// The document tree could not be normalized.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The renderer was invoked on a document that has validation errors.
    #[error("Render precondition violated: document has {errors} unresolved error(s)")]
    RenderPrecondition { errors: usize },

    /// Tool settings file could not be loaded.
    #[error("Invalid settings at {path}: {message}")]
    SettingsError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for SpecForge operations.
pub type Result<T> = std::result::Result<T, SpecForgeError>;
