//! Canonical rendering of validated documents.
//!
//! - [`text`] emits the fixed-order text artifact consumed downstream
//! - [`yaml`] writes the normalized document back as canonical YAML
//!
//! Both are pure: the same document always renders to the same bytes.

pub mod text;
pub mod yaml;

use sha2::{Digest, Sha256};

pub use text::render_text;
pub use yaml::{render_yaml, to_tree};

/// A rendered text artifact and its content digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub text: String,
    /// Hex-encoded SHA-256 of `text`.
    pub digest: String,
}

impl Artifact {
    pub fn new(text: String) -> Self {
        let hash = Sha256::digest(text.as_bytes());
        let digest = hex::encode(&hash[..]);
        Self { text, digest }
    }
}
