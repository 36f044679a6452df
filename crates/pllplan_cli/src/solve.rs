//! `pllplan solve`: plan a single request given on the command line.

use pllplan_common::Frequency;
use pllplan_diagnostics::DiagnosticSink;
use pllplan_solver::{ClockRequest, SolvedConfiguration};

use crate::pipeline::{parse_output, render_diagnostics, sorted_diagnostics};
use crate::{GlobalArgs, ReportFormat, SolveArgs};

/// Subject used for diagnostics about the command-line request.
const SUBJECT: &str = "cli";

/// Runs the `pllplan solve` command.
///
/// Prints the solved configuration to stdout. Returns exit code 0 on success,
/// 1 if the request could not be planned.
pub fn run(args: &SolveArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let profile = pllplan_profile::load_profile(&args.family, &args.speed_grade)?;
    let request = build_request(args)?;

    if !global.quiet {
        eprintln!("   Solving {} outputs on {}", request.outputs.len(), profile.name());
    }

    let sink = DiagnosticSink::new();
    let result = pllplan_solver::plan(SUBJECT, &profile, &request, &sink);
    let diagnostics = sorted_diagnostics(&sink);

    match args.format {
        ReportFormat::Text => {
            if let Ok(config) = &result {
                print!("{}", config.summary());
                if global.verbose {
                    println!("fingerprint: {}", config.fingerprint());
                }
            } else {
                render_diagnostics(&diagnostics, global);
            }
        }
        ReportFormat::Json => {
            let value = match &result {
                Ok(config) => config_json(config)?,
                Err(_) => serde_json::json!({ "diagnostics": diagnostics }),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(if result.is_ok() { 0 } else { 1 })
}

fn build_request(args: &SolveArgs) -> Result<ClockRequest, Box<dyn std::error::Error>> {
    let input: Frequency = args.input.parse()?;
    args.outputs
        .iter()
        .enumerate()
        .try_fold(ClockRequest::new(input), |request, (index, spec)| {
            Ok(request.with_output(parse_output(index, spec)?))
        })
}

/// A configuration as JSON, with its fingerprint alongside.
pub fn config_json(
    config: &SolvedConfiguration,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let mut value = serde_json::to_value(config)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert(
            "fingerprint".to_string(),
            serde_json::Value::String(config.fingerprint().to_string()),
        );
    }
    Ok(value)
}
