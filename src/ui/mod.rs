//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing payloads to stdout and status to stderr
//! - [`MockUI`] capturing everything for tests
//!
//! # Example
//!
//! ```
//! use specforge::ui::{MockUI, OutputMode, UserInterface};
//!
//! let mut ui = MockUI::with_mode(OutputMode::Quiet);
//! ui.emit("=== SPECIFICATION ===\n");
//! ui.success("Rendered base64");
//! assert_eq!(ui.emitted(), "=== SPECIFICATION ===\n");
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ForgeTheme, Status};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Write command output (artifact, report, schema) verbatim.
    ///
    /// Never suppressed by the output mode.
    fn emit(&mut self, text: &str);

    /// Write a formatted diagnostic report to stderr verbatim.
    ///
    /// Never suppressed by the output mode.
    fn report(&mut self, text: &str);

    /// Display a status message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Whether report formatters should colour their output.
    fn use_colors(&self) -> bool;
}
