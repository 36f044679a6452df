//! Shared helpers for CLI commands.
//!
//! Project root resolution, parsing of `--output` specifications, and
//! diagnostic rendering.

use std::path::{Path, PathBuf};

use pllplan_common::Frequency;
use pllplan_config::CONFIG_FILE;
use pllplan_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use pllplan_solver::OutputSpec;

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory containing `pllplan.toml`.
///
/// Returns the directory containing `pllplan.toml`, or an error if none is found.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir → itself).
/// Otherwise walks up from the current directory looking for `pllplan.toml`.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// Parses a `FREQ[@PHASE][:DUTY]` output specification for tap `index`.
///
/// Examples: `"100MHz"`, `"25MHz@90"`, `"25MHz@90:0.4"`, `"12.5MHz:0.25"`.
pub fn parse_output(index: usize, s: &str) -> Result<OutputSpec, Box<dyn std::error::Error>> {
    let (rest, duty) = match s.split_once(':') {
        Some((rest, duty)) => (rest, Some(duty)),
        None => (s, None),
    };
    let (freq, phase) = match rest.split_once('@') {
        Some((freq, phase)) => (freq, Some(phase)),
        None => (rest, None),
    };

    let freq: Frequency = freq.parse()?;
    let mut spec = OutputSpec::new(index, freq);
    if let Some(phase) = phase {
        let phase: f64 = phase
            .trim()
            .parse()
            .map_err(|_| format!("invalid phase in output '{s}'"))?;
        spec = spec.with_phase(phase);
    }
    if let Some(duty) = duty {
        let duty: f64 = duty
            .trim()
            .parse()
            .map_err(|_| format!("invalid duty cycle in output '{s}'"))?;
        spec = spec.with_duty_cycle(duty);
    }
    Ok(spec)
}

/// Drains the sink, ordering diagnostics by subject.
///
/// Blocks are planned in parallel, so the sink's own order is not stable.
pub fn sorted_diagnostics(sink: &DiagnosticSink) -> Vec<Diagnostic> {
    let mut diagnostics = sink.take_all();
    diagnostics.sort_by(|a, b| a.subject.cmp(&b.subject));
    diagnostics
}

/// Renders diagnostics to stderr using the terminal renderer.
///
/// Notes are skipped in quiet mode. Returns the number of diagnostics rendered.
pub fn render_diagnostics(diagnostics: &[Diagnostic], global: &GlobalArgs) -> usize {
    let renderer = TerminalRenderer::new(global.color);
    let mut rendered = 0;
    for diag in diagnostics {
        if global.quiet && !diag.severity.is_error() {
            continue;
        }
        eprintln!("{}", renderer.render(diag));
        rendered += 1;
    }
    rendered
}
