//! `pllplan profiles`: list the built-in primitive profiles.

use pllplan_profile::ConstraintProfile;

use crate::{GlobalArgs, ProfilesArgs, ReportFormat};

/// Runs the `pllplan profiles` command.
pub fn run(args: &ProfilesArgs, _global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let profiles = pllplan_profile::all_profiles()?;
    match args.format {
        ReportFormat::Text => {
            for profile in &profiles {
                print!("{}", describe(profile));
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&profiles)?);
        }
    }
    Ok(0)
}

/// Multi-line text description of one profile.
fn describe(profile: &ConstraintProfile) -> String {
    let key = match (profile.family(), profile.speed_grade()) {
        (Some(family), Some(grade)) => format!(" ({family} {grade})"),
        _ => String::new(),
    };
    let output = profile
        .output_freq_range()
        .map_or_else(|| "unconstrained".to_string(), |r| r.to_string());
    let phase = profile
        .phase_taps()
        .map_or_else(|| "none".to_string(), |taps| format!("{taps} taps"));
    format!(
        "{}{key}\n  input  {}\n  vco    {}\n  output {}\n  N {}  M {}  C {}\n  outputs {}  phase {}\n",
        profile.name(),
        profile.input_freq_range(),
        profile.vco_freq_range(),
        output,
        profile.input_divider_range(),
        profile.feedback_multiplier_range(),
        profile.output_divider_range(),
        profile.max_outputs(),
        phase,
    )
}
