//! Tool settings.
//!
//! Settings tune the heuristic parts of validation and the rendering
//! marker. They are read from `--settings <path>` or, when that flag is
//! absent, from `.specforge.yml` in the working directory if it exists.
//! Every key is optional.
//!
//! ```yaml
//! border_marker: "==="
//! edge_case_similarity: 0.5
//! min_shared_tokens: 1
//! extra_registers: [x0, x1]
//! known_identifiers: [LinkedIn]
//! jobs: 4
//! parallel_rules: true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SpecForgeError};

/// Default settings file name looked up in the working directory.
pub const SETTINGS_FILE: &str = ".specforge.yml";

/// Settings that apply to every document processed in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeSettings {
    /// Marker wrapped around each section title in the rendered artifact.
    pub border_marker: String,

    /// Overlap coefficient an edge case and a test must reach to match.
    pub edge_case_similarity: f64,

    /// Minimum number of shared significant tokens for a test to count.
    pub min_shared_tokens: usize,

    /// Additional register names recognized in prose (e.g. another ISA).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_registers: Vec<String>,

    /// PascalCase words that are never treated as structure references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known_identifiers: Vec<String>,

    /// Worker threads for batch processing (rayon default when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,

    /// Evaluate validation rules in parallel.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub parallel_rules: bool,
}

impl Default for ForgeSettings {
    fn default() -> Self {
        Self {
            border_marker: default_border_marker(),
            edge_case_similarity: default_edge_case_similarity(),
            min_shared_tokens: default_min_shared_tokens(),
            extra_registers: Vec::new(),
            known_identifiers: Vec::new(),
            jobs: None,
            parallel_rules: true,
        }
    }
}

fn default_border_marker() -> String {
    "===".to_string()
}

fn default_edge_case_similarity() -> f64 {
    0.5
}

fn default_min_shared_tokens() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

impl ForgeSettings {
    /// Load settings from an explicit path, or discover them in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if an explicitly named file is missing, or
    /// if any settings file fails to parse or has out-of-range values.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => {
                let discovered = dir.join(SETTINGS_FILE);
                if discovered.is_file() {
                    Self::load_file(&discovered)
                } else {
                    tracing::debug!("No settings file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load settings from a YAML file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SpecForgeError::SettingsError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let settings = Self::parse(&content, path)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from YAML text.
    pub fn parse(content: &str, source_path: &Path) -> Result<Self> {
        let settings: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| settings_error(source_path, e.to_string()))?
        };
        settings.check(source_path)?;
        Ok(settings)
    }

    fn check(&self, source_path: &Path) -> Result<()> {
        if !(0.0..=1.0).contains(&self.edge_case_similarity) {
            return Err(settings_error(
                source_path,
                format!(
                    "edge_case_similarity must be between 0 and 1, got {}",
                    self.edge_case_similarity
                ),
            ));
        }
        if self.jobs == Some(0) {
            return Err(settings_error(source_path, "jobs must be at least 1"));
        }
        Ok(())
    }
}

fn settings_error(path: &Path, message: impl Into<String>) -> SpecForgeError {
    SpecForgeError::SettingsError {
        path: PathBuf::from(path),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let settings = ForgeSettings::default();
        assert_eq!(settings.border_marker, "===");
        assert_eq!(settings.edge_case_similarity, 0.5);
        assert_eq!(settings.min_shared_tokens, 1);
        assert!(settings.parallel_rules);
        assert!(settings.jobs.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let settings =
            ForgeSettings::parse("edge_case_similarity: 0.8\n", Path::new("s.yml")).unwrap();
        assert_eq!(settings.edge_case_similarity, 0.8);
        assert_eq!(settings.border_marker, "===");
    }

    #[test]
    fn empty_file_is_default() {
        let settings = ForgeSettings::parse("", Path::new("s.yml")).unwrap();
        assert_eq!(settings, ForgeSettings::default());
    }

    #[test]
    fn rejects_out_of_range_similarity() {
        let err = ForgeSettings::parse("edge_case_similarity: 1.5\n", Path::new("s.yml"))
            .unwrap_err();
        assert!(err.to_string().contains("edge_case_similarity"));
    }

    #[test]
    fn rejects_zero_jobs() {
        assert!(ForgeSettings::parse("jobs: 0\n", Path::new("s.yml")).is_err());
    }

    #[test]
    fn discovers_settings_file_in_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE), "border_marker: '###'\n").unwrap();

        let settings = ForgeSettings::load(None, temp.path()).unwrap();
        assert_eq!(settings.border_marker, "###");
    }

    #[test]
    fn missing_directory_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = ForgeSettings::load(None, temp.path()).unwrap();
        assert_eq!(settings, ForgeSettings::default());
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = ForgeSettings::load(Some(&temp.path().join("nope.yml")), temp.path());
        assert!(matches!(err, Err(SpecForgeError::SettingsError { .. })));
    }
}
