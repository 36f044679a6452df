//! `pllplan plan`: plan every clocking block of a project.
//!
//! 1. Find project root (walk up looking for `pllplan.toml`)
//! 2. Load and validate the configuration
//! 3. Resolve each block to a profile and request
//! 4. Plan all blocks in parallel
//! 5. Render diagnostics or JSON results

use pllplan_diagnostics::{DiagnosticSink, Severity};
use pllplan_solver::{PlanJob, PlanningError, SolvedConfiguration};

use crate::pipeline::{render_diagnostics, resolve_project_root, sorted_diagnostics};
use crate::solve::config_json;
use crate::{GlobalArgs, PlanArgs, ReportFormat};

/// Runs the `pllplan plan` command.
///
/// Returns exit code 0 if every block was planned, 1 if any failed.
pub fn run(args: &PlanArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let config = pllplan_config::load_config(&project_dir)?;
    let jobs = pllplan_config::resolve_blocks(&config)?;

    if !global.quiet {
        eprintln!("   Planning {} clock block(s) in {}", jobs.len(), project_dir.display());
    }

    let sink = DiagnosticSink::new();
    let results = pllplan_solver::plan_all(&jobs, &sink);
    let diagnostics = sorted_diagnostics(&sink);
    let failed = results.iter().filter(|r| r.is_err()).count();

    match args.format {
        ReportFormat::Text => {
            render_diagnostics(&diagnostics, global);
            if global.verbose {
                for config in results.iter().flatten() {
                    print!("{}", config.summary());
                }
            }
            if !global.quiet {
                let count = |severity| diagnostics.iter().filter(|d| d.severity == severity).count();
                eprintln!(
                    "   Result: {} planned, {} error(s), {} warning(s)",
                    results.len() - failed,
                    count(Severity::Error),
                    count(Severity::Warning)
                );
            }
        }
        ReportFormat::Json => {
            let value = results_json(&jobs, &results)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(if failed == 0 { 0 } else { 1 })
}

/// One JSON object per block, in job order.
fn results_json(
    jobs: &[PlanJob],
    results: &[Result<SolvedConfiguration, PlanningError>],
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let mut blocks = Vec::with_capacity(jobs.len());
    for (job, result) in jobs.iter().zip(results) {
        let entry = match result {
            Ok(config) => serde_json::json!({
                "name": job.name,
                "ok": true,
                "configuration": config_json(config)?,
            }),
            Err(err) => serde_json::json!({
                "name": job.name,
                "ok": false,
                "code": err.code().to_string(),
                "error": err.to_string(),
            }),
        };
        blocks.push(entry);
    }
    Ok(serde_json::Value::Array(blocks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project(contents: &str) -> (TempDir, GlobalArgs) {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("pllplan.toml"), contents).unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(tmp.path().display().to_string()),
        };
        (tmp, global)
    }

    const GOOD: &str = r#"
[target]
family = "cyclone_ii"
speed_grade = "-6"

[plls.sys]
input = "50MHz"
outputs = [{ freq = "100MHz" }, { freq = "25MHz", phase = 90.0 }]

[plls.uart]
input = "50MHz"
outputs = [{ freq = "1MHz" }]
"#;

    #[test]
    fn plans_every_block() {
        let (_tmp, global) = project(GOOD);
        let args = PlanArgs {
            format: ReportFormat::Text,
        };
        assert_eq!(run(&args, &global).unwrap(), 0);
    }

    #[test]
    fn failing_block_sets_exit_code() {
        let (_tmp, global) = project(&format!(
            "{GOOD}\n[plls.bad]\ninput = \"1MHz\"\noutputs = [{{ freq = \"100MHz\" }}]\n"
        ));
        let args = PlanArgs {
            format: ReportFormat::Json,
        };
        assert_eq!(run(&args, &global).unwrap(), 1);
    }

    #[test]
    fn missing_config_is_error() {
        let tmp = TempDir::new().unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(tmp.path().display().to_string()),
        };
        let args = PlanArgs {
            format: ReportFormat::Text,
        };
        assert!(run(&args, &global).is_err());
    }

    #[test]
    fn json_reports_each_block() {
        let config = pllplan_config::load_config_from_str(&format!(
            "{GOOD}\n[plls.bad]\ninput = \"1MHz\"\noutputs = [{{ freq = \"100MHz\" }}]\n"
        ))
        .unwrap();
        let jobs = pllplan_config::resolve_blocks(&config).unwrap();
        let results = pllplan_solver::plan_all(&jobs, &DiagnosticSink::new());
        let value = results_json(&jobs, &results).unwrap();

        let blocks = value.as_array().unwrap();
        let names: Vec<&str> = blocks.iter().map(|b| b["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["bad", "sys", "uart"]);
        assert_eq!(blocks[0]["ok"], false);
        assert_eq!(blocks[0]["code"], "E001");
        assert_eq!(blocks[1]["ok"], true);
        assert_eq!(blocks[1]["configuration"]["vco_freq"], 300e6);
    }
}
