//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// error[E003]: no feasible configuration
///   --> pll `sys`
///    = note: best worst-case error 2.5% exceeds 1%
///    = help: relax the output frequency
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn severity_label(&self, diag: &Diagnostic) -> String {
        let label = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return label;
        }
        let ansi = match diag.severity {
            Severity::Error => "\x1b[1;31m",
            Severity::Warning => "\x1b[1;33m",
            Severity::Note => "\x1b[1;36m",
        };
        format!("{ansi}{label}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}: {}\n", self.severity_label(diag), diag.message);

        if let Some(subject) = &diag.subject {
            out.push_str(&format!("  --> pll `{subject}`\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};

    #[test]
    fn render_error_with_subject() {
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 3),
            "no feasible configuration",
        )
        .with_subject("sys")
        .with_note("best worst-case error 2.5% exceeds 1%")
        .with_help("relax the output frequency");

        let output = TerminalRenderer::new(false).render(&diag);
        assert_eq!(
            output,
            "error[E003]: no feasible configuration\n  --> pll `sys`\n   = note: best worst-case error 2.5% exceeds 1%\n   = help: relax the output frequency\n"
        );
    }

    #[test]
    fn render_without_subject() {
        let diag = Diagnostic::note(DiagnosticCode::new(Category::Note, 1), "solved");
        let output = TerminalRenderer::new(false).render(&diag);
        assert_eq!(output, "note[N001]: solved\n");
    }

    #[test]
    fn render_with_color() {
        let diag = Diagnostic::error(DiagnosticCode::new(Category::Error, 1), "bad input");
        let output = TerminalRenderer::new(true).render(&diag);
        assert!(output.starts_with("\x1b[1;31merror[E001]\x1b[0m: bad input"));
    }
}
