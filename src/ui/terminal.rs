//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{GemTheme, OutputMode, UserInterface};

/// Terminal UI writing status to stdout and problems to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: GemTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI, colored when the terminal supports it.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_theme(mode, GemTheme::detect())
    }

    pub fn with_theme(mode: OutputMode, theme: GemTheme) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }

    pub fn theme(&self) -> &GemTheme {
        &self.theme
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn field(&mut self, key: &str, value: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "  {}", self.theme.format_field(key, value)).ok();
        }
    }

    fn data(&mut self, text: &str) {
        writeln!(self.out, "{}", text).ok();
    }
}

/// Create the UI for a CLI invocation.
///
/// `no_color` forces the plain theme.
pub fn create_ui(mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    if no_color {
        Box::new(TerminalUI::with_theme(mode, GemTheme::plain()))
    } else {
        Box::new(TerminalUI::new(mode))
    }
}
