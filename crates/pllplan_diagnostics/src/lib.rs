//! Diagnostic creation, severity management, and rendering.
//!
//! This crate provides structured [`Diagnostic`] messages with severity levels,
//! codes, a subject naming the clocking block they concern, notes and help
//! text. The thread-safe [`DiagnosticSink`] accumulates diagnostics while
//! blocks are planned in parallel, and [`TerminalRenderer`] formats them for
//! humans. Diagnostics also serialize to JSON for machine consumers.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
