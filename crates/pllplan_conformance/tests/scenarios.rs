//! Reference scenarios on the built-in profiles, with exact expected dividers.

use pllplan_conformance::{assert_feasible, mhz, profile, request};
use pllplan_solver::{solve, ClockRequest, OutputSpec, PlanningError};

#[test]
fn cyclone_ii_single_output_exact() {
    let p = profile("cyclone_ii", "-6");
    let req = request(50.0, &[100.0]);
    let config = solve(&p, &req).unwrap();
    assert_feasible(&p, &req, &config);

    assert_eq!(config.input_divider(), 1);
    assert_eq!(config.feedback_multiplier(), 6);
    assert_eq!(config.vco_freq().hz(), 300e6);
    assert_eq!(config.output(0).unwrap().divider, 3);
    assert_eq!(config.output(0).unwrap().actual_freq.hz(), 100e6);
    assert!(config.is_exact());
}

#[test]
fn cyclone_ii_input_below_range() {
    let p = profile("cyclone_ii", "-6");
    let err = solve(&p, &request(1.0, &[100.0])).unwrap_err();
    match err {
        PlanningError::InputFrequencyOutOfRange { input, range } => {
            assert_eq!(input.hz(), 1e6);
            assert_eq!(range.min().hz(), 5e6);
        }
        other => panic!("expected InputFrequencyOutOfRange, got {other:?}"),
    }
}

#[test]
fn cyclone_ii_two_outputs_share_vco() {
    let p = profile("cyclone_ii", "-6");
    let req = request(50.0, &[50.0, 33.0]);
    let config = solve(&p, &req).unwrap();
    assert_feasible(&p, &req, &config);

    assert_eq!(config.vco_freq().hz(), 950e6);
    let a = config.output(0).unwrap();
    let b = config.output(1).unwrap();
    assert_eq!((a.divider, b.divider), (19, 29));
    assert_eq!(a.relative_error, 0.0);
    // Worst case, not the mean.
    assert_eq!(config.worst_error(), b.relative_error);
    assert!((config.worst_error() - 0.007314524555903831).abs() < 1e-12);
}

#[test]
fn cyclone_ii_three_outputs() {
    let p = profile("cyclone_ii", "-6");
    let req = request(50.0, &[100.0, 25.0, 33.333333]);
    let config = solve(&p, &req).unwrap();
    assert_feasible(&p, &req, &config);
    let dividers: Vec<u32> = config.outputs().iter().map(|o| o.divider).collect();
    assert_eq!(dividers, vec![3, 12, 9]);
}

#[test]
fn cyclone_ii_output_capped_by_grade() {
    let p = profile("cyclone_ii", "-6");
    let req = request(50.0, &[401.0]);
    let config = solve(&p, &req).unwrap();
    assert_feasible(&p, &req, &config);
    assert_eq!(config.output(0).unwrap().actual_freq.hz(), 400e6);

    // Slower grades cap lower and cannot get within 1%.
    let slow = profile("cyclone_ii", "-8");
    let err = solve(&slow, &req).unwrap_err();
    assert!(matches!(err, PlanningError::NoFeasibleConfiguration { .. }));
}

#[test]
fn spartan3_pll_six_outputs() {
    let p = profile("spartan3_pll", "-2");
    let req = request(100.0, &[125.0, 200.0, 50.0, 100.0, 250.0, 10.0]);
    let config = solve(&p, &req).unwrap();
    assert_feasible(&p, &req, &config);
    assert_eq!(config.vco_freq().hz(), 1e9);
    assert!(config.is_exact());
}

#[test]
fn spartan3_pll_needs_input_divider() {
    let p = profile("spartan3_pll", "-1");
    let req = request(100.0, &[148.5]);
    let config = solve(&p, &req).unwrap();
    assert_feasible(&p, &req, &config);
    assert_eq!(config.input_divider(), 11);
    assert_eq!(config.feedback_multiplier(), 49);
}

#[test]
fn spartan3_dcm_video_clock() {
    let p = profile("spartan3_dcm", "-1");
    let req = request(27.0, &[74.25]);
    let config = solve(&p, &req).unwrap();
    assert_feasible(&p, &req, &config);
    assert_eq!(config.feedback_multiplier(), 11);
    assert_eq!(config.output(0).unwrap().divider, 4);
}

#[test]
fn spartan3_dcm_single_output_only() {
    let p = profile("spartan3_dcm", "-1");
    let err = solve(&p, &request(50.0, &[100.0, 25.0])).unwrap_err();
    assert_eq!(
        err,
        PlanningError::TooManyOutputs {
            requested: 2,
            max: 1
        }
    );
}

#[test]
fn phase_resolution_follows_divider() {
    let p = profile("cyclone_ii", "-6");
    // C=3 gives 360 / (8 * 3) = 15 degree steps.
    let ok = ClockRequest::new(mhz(50.0)).with_output(OutputSpec::new(0, mhz(100.0)).with_phase(135.0));
    assert!(solve(&p, &ok).is_ok());

    let bad = ClockRequest::new(mhz(50.0)).with_output(OutputSpec::new(0, mhz(100.0)).with_phase(100.0));
    assert_eq!(
        solve(&p, &bad).unwrap_err(),
        PlanningError::UnachievablePhase {
            index: 0,
            phase: 100.0,
            step: 15.0
        }
    );
}

#[test]
fn sparse_output_indices() {
    let p = profile("spartan3_pll", "-3");
    let req = ClockRequest::new(mhz(100.0))
        .with_output(OutputSpec::new(5, mhz(50.0)))
        .with_output(OutputSpec::new(2, mhz(200.0)));
    let config = solve(&p, &req).unwrap();
    assert_feasible(&p, &req, &config);
    let indices: Vec<usize> = config.outputs().iter().map(|o| o.index).collect();
    assert_eq!(indices, vec![2, 5]);
}

#[test]
fn summary_and_json() {
    let p = profile("cyclone_ii", "-7");
    let config = solve(&p, &request(50.0, &[100.0])).unwrap();
    let summary = config.summary();
    assert!(summary.starts_with("Cyclone II PLL -7: 50MHz / 1 * 6 = VCO 300MHz\n"));

    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["profile_name"], "Cyclone II PLL -7");
    assert_eq!(json["input_divider"], 1);
    assert_eq!(json["outputs"][0]["divider"], 3);
}
