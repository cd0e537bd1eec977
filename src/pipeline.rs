//! Document pipeline: load, normalize, validate, render.
//!
//! A document moves through the stages in order and stops at the first
//! one that fails. Schema failures stop before validation and carry no
//! diagnostics; validation findings never stop the pipeline, but any
//! error keeps the renderer from running.
//!
//! Batches run documents in parallel on a rayon pool. A failure in one
//! document never affects its siblings, and results come back in input
//! order.

use rayon::prelude::*;
use serde_yaml::Value;
use std::path::{Path, PathBuf};

use crate::document::{load_document_file, normalize, SpecDocument};
use crate::error::{Result, SpecForgeError};
use crate::lint::{DocumentDiagnostics, Validator};
use crate::render::{render_text, Artifact};
use crate::report::Report;
use crate::settings::ForgeSettings;

/// A normalized document and the report the built-in rules produced for it.
///
/// Only [`Pipeline`] creates these, so a `Checked` whose report is valid
/// is proof that the document passed validation. The renderer requires
/// one.
#[derive(Debug, Clone)]
pub struct Checked {
    document: SpecDocument,
    report: Report,
}

impl Checked {
    pub fn document(&self) -> &SpecDocument {
        &self.document
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn into_parts(self) -> (SpecDocument, Report) {
        (self.document, self.report)
    }
}

/// Result of running the full pipeline on one document.
#[derive(Debug, Clone)]
pub struct Forged {
    pub document: SpecDocument,
    pub report: Report,
    /// Present only when the report is valid.
    pub artifact: Option<Artifact>,
}

/// Outcome for one input of a batch.
#[derive(Debug, Clone)]
pub struct DocumentResult {
    /// Display name of the input, usually its path.
    pub source: String,
    /// The checked document, or why it could not be loaded or normalized.
    pub outcome: std::result::Result<Checked, String>,
}

impl DocumentResult {
    /// View for the lint formatters.
    pub fn diagnostics(&self) -> DocumentDiagnostics<'_> {
        match &self.outcome {
            Ok(checked) => DocumentDiagnostics {
                source: self.source.clone(),
                diagnostics: checked.report().diagnostics(),
                failure: None,
            },
            Err(failure) => DocumentDiagnostics {
                source: self.source.clone(),
                diagnostics: &[],
                failure: Some(failure.clone()),
            },
        }
    }

    pub fn report(&self) -> Option<&Report> {
        self.outcome.as_ref().ok().map(Checked::report)
    }

    /// Loaded, valid, and under `strict` free of warnings.
    pub fn passes(&self, strict: bool) -> bool {
        self.report().is_some_and(|report| report.passes(strict))
    }
}

/// Runs documents through the pipeline with one set of settings.
pub struct Pipeline {
    settings: ForgeSettings,
    validator: Validator,
}

impl Pipeline {
    pub fn new(settings: ForgeSettings) -> Self {
        Self {
            settings,
            validator: Validator::with_builtins(),
        }
    }

    pub fn settings(&self) -> &ForgeSettings {
        &self.settings
    }

    /// Normalize and validate a raw document tree.
    ///
    /// # Errors
    ///
    /// Returns `SpecForgeError::Schema` if the tree cannot be normalized;
    /// no validation runs in that case.
    pub fn check(&self, tree: &Value) -> Result<Checked> {
        let document = normalize(tree)?;
        tracing::debug!(document = %document.metadata.name, "Normalized document");
        Ok(self.check_document(document))
    }

    /// Validate an already normalized document.
    pub fn check_document(&self, document: SpecDocument) -> Checked {
        let report = self.validator.validate(&document, &self.settings);
        Checked { document, report }
    }

    /// Load, normalize and validate a document file.
    pub fn check_file(&self, path: &Path) -> Result<Checked> {
        tracing::debug!("Loading document from {}", path.display());
        let tree = load_document_file(path)?;
        self.check(&tree)
    }

    /// Check a tree and render it when it is valid.
    pub fn forge(&self, tree: &Value) -> Result<Forged> {
        let checked = self.check(tree)?;
        let artifact = if checked.report().is_valid() {
            Some(render_text(&checked, &self.settings)?)
        } else {
            tracing::debug!(
                errors = checked.report().error_count(),
                "Document has errors; skipping render"
            );
            None
        };
        let (document, report) = checked.into_parts();
        Ok(Forged {
            document,
            report,
            artifact,
        })
    }

    /// Load a document file, check it and render it when it is valid.
    pub fn forge_file(&self, path: &Path) -> Result<Forged> {
        tracing::debug!("Loading document from {}", path.display());
        let tree = load_document_file(path)?;
        self.forge(&tree)
    }

    /// Check many files in parallel.
    ///
    /// Results are in the order of `paths`. A document that fails to load
    /// or normalize yields a failed [`DocumentResult`]; it does not abort
    /// the batch.
    ///
    /// # Errors
    ///
    /// Only when the worker pool cannot be created.
    pub fn check_batch(&self, paths: &[PathBuf]) -> Result<Vec<DocumentResult>> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(jobs) = self.settings.jobs.filter(|jobs| *jobs > 0) {
            builder = builder.num_threads(jobs);
        }
        let pool = builder.build().map_err(|e| {
            SpecForgeError::Other(anyhow::anyhow!("failed to build worker pool: {e}"))
        })?;

        tracing::debug!(
            documents = paths.len(),
            threads = pool.current_num_threads(),
            "Checking batch"
        );

        let results = pool.install(|| {
            paths
                .par_iter()
                .map(|path| self.check_one(path))
                .collect::<Vec<_>>()
        });
        Ok(results)
    }

    fn check_one(&self, path: &Path) -> DocumentResult {
        let source = path.display().to_string();
        let outcome = self.check_file(path).map_err(|e| {
            tracing::warn!("{}: {}", source, e);
            e.to_string()
        });
        DocumentResult { source, outcome }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ForgeSettings::default())
    }
}
