//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, DevstationTheme, OutputMode, UserInterface};

/// Terminal UI implementation.
///
/// Status goes to stdout; errors go to stderr so they survive redirection.
pub struct TerminalUI {
    term: Term,
    err_term: Term,
    theme: DevstationTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI, detecting color support.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_colors(mode, should_use_colors())
    }

    /// Create a new terminal UI with colors forced on or off.
    pub fn with_colors(mode: OutputMode, colors: bool) -> Self {
        let theme = if colors {
            DevstationTheme::new()
        } else {
            DevstationTheme::plain()
        };

        Self {
            term: Term::stdout(),
            err_term: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err_term, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }
}

/// Create the terminal UI for a run.
///
/// `no_color` disables styling even on a color-capable terminal.
pub fn create_ui(mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    let colors = !no_color && should_use_colors();
    Box::new(TerminalUI::with_colors(mode, colors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn create_ui_respects_mode() {
        let ui = create_ui(OutputMode::Silent, true);
        assert_eq!(ui.output_mode(), OutputMode::Silent);
    }

    #[test]
    fn silent_ui_accepts_all_calls() {
        let mut ui = TerminalUI::with_colors(OutputMode::Silent, false);
        ui.show_header("c");
        ui.message("Installing mingw...");
        ui.success("mingw installed");
        ui.warning("gdb failed");
    }
}
