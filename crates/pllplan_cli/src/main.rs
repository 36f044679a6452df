//! pllplan: frequency planning for FPGA PLL and DCM primitives.
//!
//! Provides `pllplan solve` for a one-off request given on the command line,
//! `pllplan plan` for every clocking block in a project's `pllplan.toml`, and
//! `pllplan profiles` for listing the built-in primitive profiles.

#![warn(missing_docs)]

mod pipeline;
mod plan;
mod profiles;
mod solve;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// pllplan: find divider settings for FPGA clock primitives.
#[derive(Parser, Debug)]
#[command(name = "pllplan", version, about = "FPGA PLL/DCM frequency planner")]
pub struct Cli {
    /// Suppress all output except errors and results.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the full configuration summary of every planned block.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `pllplan.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve a single clock request.
    Solve(SolveArgs),
    /// Plan every clocking block in `pllplan.toml`.
    Plan(PlanArgs),
    /// List the built-in primitive profiles.
    Profiles(ProfilesArgs),
}

/// Arguments for the `pllplan solve` subcommand.
#[derive(Parser, Debug)]
pub struct SolveArgs {
    /// Primitive family (e.g. `cyclone_ii`, `spartan3_pll`, `spartan3_dcm`).
    #[arg(long)]
    pub family: String,

    /// Speed grade (e.g. `-6`).
    #[arg(long, allow_hyphen_values = true)]
    pub speed_grade: String,

    /// Reference clock frequency (e.g. `50MHz`).
    #[arg(short, long)]
    pub input: String,

    /// Requested output as `FREQ[@PHASE][:DUTY]`, e.g. `25MHz@90:0.4`.
    /// Repeat for more outputs; taps are numbered in order.
    #[arg(short, long = "output", required = true)]
    pub outputs: Vec<String>,

    /// Output format for the result.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `pllplan plan` subcommand.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Output format for diagnostics and results.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `pllplan profiles` subcommand.
#[derive(Parser, Debug)]
pub struct ProfilesArgs {
    /// Output format for the listing.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress progress output.
    pub quiet: bool,
    /// Whether to print full configuration summaries.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Solve(ref args) => solve::run(args, &global),
        Command::Plan(ref args) => plan::run(args, &global),
        Command::Profiles(ref args) => profiles::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_solve() {
        let cli = Cli::parse_from([
            "pllplan",
            "solve",
            "--family",
            "cyclone_ii",
            "--speed-grade",
            "-6",
            "--input",
            "50MHz",
            "--output",
            "100MHz",
            "--output",
            "25MHz@90:0.4",
        ]);
        match cli.command {
            Command::Solve(ref args) => {
                assert_eq!(args.family, "cyclone_ii");
                assert_eq!(args.speed_grade, "-6");
                assert_eq!(args.input, "50MHz");
                assert_eq!(args.outputs, vec!["100MHz", "25MHz@90:0.4"]);
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Solve command"),
        }
    }

    #[test]
    fn parse_solve_json() {
        let cli = Cli::parse_from([
            "pllplan",
            "solve",
            "--family",
            "s3dcm",
            "--speed-grade",
            "1",
            "-i",
            "27MHz",
            "-o",
            "74.25MHz",
            "--format",
            "json",
        ]);
        match cli.command {
            Command::Solve(ref args) => {
                assert_eq!(args.outputs, vec!["74.25MHz"]);
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Solve command"),
        }
    }

    #[test]
    fn solve_requires_an_output() {
        let result = Cli::try_parse_from([
            "pllplan",
            "solve",
            "--family",
            "cyclone_ii",
            "--speed-grade",
            "-6",
            "--input",
            "50MHz",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_plan_default() {
        let cli = Cli::parse_from(["pllplan", "plan"]);
        match cli.command {
            Command::Plan(ref args) => assert_eq!(args.format, ReportFormat::Text),
            _ => panic!("expected Plan command"),
        }
    }

    #[test]
    fn parse_profiles_json() {
        let cli = Cli::parse_from(["pllplan", "profiles", "--format", "json"]);
        match cli.command {
            Command::Profiles(ref args) => assert_eq!(args.format, ReportFormat::Json),
            _ => panic!("expected Profiles command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["pllplan", "--quiet", "--color", "never", "plan"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pllplan", "plan", "--verbose", "--color", "always"]);
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Always);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["pllplan", "--config", "/path/to/pllplan.toml", "plan"]);
        assert_eq!(cli.config.as_deref(), Some("/path/to/pllplan.toml"));
    }
}
