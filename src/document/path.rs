//! Dotted locators into the source document.
//!
//! Diagnostics and schema errors point at nodes with paths such as
//! `algorithms[2].steps.main_loop[1]` or `structures.DataBuffer`.

/// Append a map key to a path.
pub fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

/// Append a sequence index to a path.
pub fn index(path: &str, i: usize) -> String {
    format!("{}[{}]", path, i)
}
