//! Structured diagnostic messages with severity, codes, notes and help.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message about one clocking block.
///
/// Each diagnostic includes a severity, a code, a primary message and an
/// optional subject (usually the block name), plus free-form notes and help
/// lines. Notes carry detail such as per-output results; help lines suggest
/// what the user can change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the kind of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// What the diagnostic is about (e.g. the PLL block name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Explanatory footnotes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    /// Actionable suggestions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            subject: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, code, message)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, code, message)
    }

    /// Creates a new informational note.
    pub fn note(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Note, code, message)
    }

    /// Sets the subject of this diagnostic.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn create_error() {
        let code = DiagnosticCode::new(Category::Error, 1);
        let diag = Diagnostic::error(code, "input frequency out of range");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "input frequency out of range");
        assert!(diag.subject.is_none());
        assert_eq!(format!("{}", diag.code), "E001");
    }

    #[test]
    fn create_note() {
        let diag = Diagnostic::note(DiagnosticCode::new(Category::Note, 1), "solved");
        assert_eq!(diag.severity, Severity::Note);
    }

    #[test]
    fn builder_methods() {
        let code = DiagnosticCode::new(Category::Error, 3);
        let diag = Diagnostic::error(code, "no feasible configuration")
            .with_subject("sys")
            .with_note("best error 2.5%")
            .with_help("relax the output frequency");
        assert_eq!(diag.subject.as_deref(), Some("sys"));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn json_skips_empty_fields() {
        let diag = Diagnostic::warning(DiagnosticCode::new(Category::Warning, 1), "w");
        let json = serde_json::to_string(&diag).unwrap();
        assert!(!json.contains("subject"));
        assert!(!json.contains("notes"));
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, diag);
    }
}
