//! Status-line styling.

use console::Style;

/// Kind of status line written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Progress or informational text, never prefixed.
    Note,
    Success,
    Warning,
    Error,
}

impl Status {
    fn icon(self) -> Option<&'static str> {
        match self {
            Status::Note => None,
            Status::Success => Some("✓"),
            Status::Warning => Some("⚠"),
            Status::Error => Some("✗"),
        }
    }
}

/// Styles for status lines, one per [`Status`].
#[derive(Debug, Clone)]
pub struct ForgeTheme {
    note: Style,
    success: Style,
    warning: Style,
    error: Style,
}

impl Default for ForgeTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ForgeTheme {
    pub fn new() -> Self {
        Self {
            note: Style::new().dim(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
        }
    }

    /// Theme for `--no-color` and non-terminal stderr.
    pub fn plain() -> Self {
        Self {
            note: Style::new(),
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
        }
    }

    /// Render `msg` as a status line of the given kind.
    pub fn format(&self, status: Status, msg: &str) -> String {
        let style = match status {
            Status::Note => &self.note,
            Status::Success => &self.success,
            Status::Warning => &self.warning,
            Status::Error => &self.error,
        };
        let line = match status.icon() {
            Some(icon) => format!("{icon} {msg}"),
            None => msg.to_string(),
        };
        style.apply_to(line).to_string()
    }
}

/// Colour is on unless `NO_COLOR` is set or stderr is not a terminal.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::Term::stderr().is_term()
}
