//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, ForgeTheme, OutputMode, Status, UserInterface};

/// Terminal UI implementation.
///
/// Command output goes to stdout so it can be piped; everything else goes
/// to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: ForgeTheme,
    colors: bool,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, colors: bool) -> Self {
        let theme = if colors {
            ForgeTheme::new()
        } else {
            ForgeTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            colors,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn emit(&mut self, text: &str) {
        write!(self.out, "{}", text).ok();
        self.out.flush().ok();
    }

    fn report(&mut self, text: &str) {
        write!(self.err, "{}", text).ok();
        self.err.flush().ok();
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format(Status::Note, msg)).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format(Status::Success, msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format(Status::Warning, msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format(Status::Error, msg)).ok();
    }

    fn use_colors(&self) -> bool {
        self.colors
    }
}

/// Create the terminal UI, colouring only when allowed and attached to a TTY.
pub fn create_ui(mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    let colors = !no_color && should_use_colors();
    Box::new(TerminalUI::new(mode, colors))
}
