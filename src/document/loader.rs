//! Raw document loading.
//!
//! The loader turns bytes into a generic tree of maps, sequences and
//! scalars (`serde_yaml::Value`). JSON input is accepted as well since every
//! JSON document is also valid YAML. No interpretation happens here; see
//! [`super::normalize`] for the typed model.

use crate::error::{Result, SpecForgeError};
use std::fs;
use std::path::Path;

/// Load a document file into a generic tree.
///
/// # Errors
///
/// Returns `DocumentNotFound` if the file doesn't exist.
/// Returns `DocumentParseError` if the content is not valid YAML/JSON.
pub fn load_document_file(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SpecForgeError::DocumentNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SpecForgeError::Io(e)
        }
    })?;

    parse_document(&content, path)
}

/// Parse document content into a generic tree.
///
/// # Arguments
///
/// * `content` - The YAML or JSON content to parse
/// * `source_path` - Path for error reporting
pub fn parse_document(content: &str, source_path: &Path) -> Result<serde_yaml::Value> {
    serde_yaml::from_str(content).map_err(|e| SpecForgeError::DocumentParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn parses_yaml_mapping() {
        let tree = parse_document("metadata:\n  name: demo\n", Path::new("spec.yml")).unwrap();
        assert_eq!(tree["metadata"]["name"], "demo");
    }

    #[test]
    fn parses_json_input() {
        let tree = parse_document(
            r#"{"metadata": {"name": "demo", "version": "1.0"}}"#,
            Path::new("spec.json"),
        )
        .unwrap();
        assert_eq!(tree["metadata"]["version"], "1.0");
    }

    #[test]
    fn invalid_yaml_reports_parse_error() {
        let err = parse_document("metadata: [unclosed", Path::new("bad.yml")).unwrap_err();
        match err {
            SpecForgeError::DocumentParseError { path, .. } => {
                assert_eq!(path, PathBuf::from("bad.yml"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_document_file(&temp.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, SpecForgeError::DocumentNotFound { .. }));
    }

    #[test]
    fn loads_file_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("spec.yml");
        fs::write(&path, "metadata:\n  name: demo\n").unwrap();

        let tree = load_document_file(&path).unwrap();
        assert_eq!(tree["metadata"]["name"], "demo");
    }
}
