//! End-to-end planning of `pllplan.toml` projects: load, resolve, plan in
//! parallel, report.

use pllplan_conformance::{assert_feasible, plan_project};
use pllplan_diagnostics::Severity;
use pllplan_solver::{solve, PlanningError};

const BOARD: &str = r#"
[target]
family = "cyclone_ii"
speed_grade = "C6"

[plls.sys]
input = "50MHz"

[[plls.sys.outputs]]
freq = "100MHz"

[[plls.sys.outputs]]
freq = "25MHz"
phase = 90.0

[plls.sdram]
input = "50MHz"
outputs = [{ freq = "133.333333MHz" }, { index = 2, freq = "133.333333MHz", phase = 270.0 }]

[plls.video]
input = "27MHz"
profile = "dcm"
outputs = [{ freq = "74.25MHz" }]

[profiles.dcm]
input_range = ["0.5MHz", "200MHz"]
vco_range = ["5MHz", "10GHz"]
input_divider = [1, 1]
feedback_multiplier = [2, 256]
output_divider = [1, 256]
max_outputs = 1
"#;

#[test]
fn plans_every_block() {
    let result = plan_project(BOARD);
    assert_eq!(result.error_count, 0);
    let names: Vec<&str> = result.blocks.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["sdram", "sys", "video"]);
    assert!(result.blocks.iter().all(|(_, r)| r.is_ok()));
}

#[test]
fn one_note_per_block() {
    let result = plan_project(BOARD);
    assert_eq!(result.diagnostics.len(), 3);
    for diag in &result.diagnostics {
        assert_eq!(diag.severity, Severity::Note);
        assert_eq!(diag.code.to_string(), "N001");
    }
    let subjects: Vec<_> = result
        .diagnostics
        .iter()
        .map(|d| d.subject.as_deref().unwrap())
        .collect();
    assert_eq!(subjects, vec!["sdram", "sys", "video"]);
}

#[test]
fn approximate_block_warns_without_failing() {
    let text = format!("{BOARD}\n[plls.uart]\ninput = \"50MHz\"\noutputs = [{{ freq = \"33MHz\" }}]\n");
    let result = plan_project(&text);
    assert_eq!(result.error_count, 0);
    assert!(result.block("uart").unwrap().is_ok());

    let warnings: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].subject.as_deref(), Some("uart"));
    assert_eq!(warnings[0].code.to_string(), "W001");
}

#[test]
fn custom_profile_block_matches_direct_solve() {
    let config = pllplan_config::load_config_from_str(BOARD).unwrap();
    let jobs = pllplan_config::resolve_blocks(&config).unwrap();
    let video = jobs.iter().find(|j| j.name == "video").unwrap();

    let direct = solve(&video.profile, &video.request).unwrap();
    assert_feasible(&video.profile, &video.request, &direct);
    assert_eq!(direct.feedback_multiplier(), 11);

    let result = plan_project(BOARD);
    assert_eq!(result.block("video").unwrap().as_ref().unwrap(), &direct);
}

#[test]
fn failures_are_isolated_per_block() {
    let text = format!(
        "{BOARD}
[plls.too_slow]
input = \"1MHz\"
outputs = [{{ freq = \"10MHz\" }}]

[plls.too_many]
input = \"50MHz\"
outputs = [{{ freq = \"10MHz\" }}, {{ freq = \"20MHz\" }}, {{ freq = \"30MHz\" }}, {{ freq = \"40MHz\" }}]

[plls.off_grid]
input = \"50MHz\"
outputs = [{{ freq = \"100MHz\", phase = 7.0 }}]
"
    );
    let result = plan_project(&text);
    assert_eq!(result.error_count, 3);
    assert!(matches!(
        result.block("too_slow"),
        Some(Err(PlanningError::InputFrequencyOutOfRange { .. }))
    ));
    assert!(matches!(
        result.block("too_many"),
        Some(Err(PlanningError::TooManyOutputs {
            requested: 4,
            max: 3
        }))
    ));
    assert!(matches!(
        result.block("off_grid"),
        Some(Err(PlanningError::UnachievablePhase { .. }))
    ));
    assert!(result.block("sys").unwrap().is_ok());

    let codes: Vec<String> = result
        .diagnostics
        .iter()
        .filter(|d| d.severity.is_error())
        .map(|d| d.code.to_string())
        .collect();
    assert_eq!(codes, vec!["E004", "E002", "E001"]);
}

#[test]
fn parallel_planning_matches_sequential() {
    let mut text = String::from("[target]\nfamily = \"spartan3_pll\"\nspeed_grade = \"-1\"\n");
    for i in 1..=24 {
        text.push_str(&format!(
            "\n[plls.pll{i:02}]\ninput = \"100MHz\"\noutputs = [{{ freq = \"{}MHz\" }}, {{ freq = \"{}MHz\" }}]\n",
            7 * i,
            11 * i
        ));
    }
    let config = pllplan_config::load_config_from_str(&text).unwrap();
    let jobs = pllplan_config::resolve_blocks(&config).unwrap();

    let parallel = plan_project(&text);
    for (job, (name, result)) in jobs.iter().zip(&parallel.blocks) {
        assert_eq!(&job.name, name);
        assert_eq!(result, &solve(&job.profile, &job.request));
    }
}

#[test]
fn project_loaded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(pllplan_config::CONFIG_FILE), BOARD).unwrap();
    let config = pllplan_config::load_config(dir.path()).unwrap();
    assert_eq!(config.plls.len(), 3);
    assert_eq!(config.profiles.len(), 1);
}
