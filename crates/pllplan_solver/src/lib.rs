//! Frequency planning for FPGA clock-generation primitives.
//!
//! Given a [`ConstraintProfile`](pllplan_profile::ConstraintProfile) and a
//! [`ClockRequest`], [`solve`] searches every legal `(input divider, feedback
//! multiplier)` pair and every output divider, and returns the
//! [`SolvedConfiguration`] whose worst-served output has the smallest relative
//! frequency error. The search is exhaustive, bounded and deterministic:
//! identical inputs always produce an identical configuration.
//!
//! ```
//! use pllplan_common::Frequency;
//! use pllplan_profile::load_profile;
//! use pllplan_solver::{solve, ClockRequest, OutputSpec};
//!
//! let profile = load_profile("cyclone_ii", "-6").unwrap();
//! let request = ClockRequest::new(Frequency::from_mhz(50.0))
//!     .with_output(OutputSpec::new(0, Frequency::from_mhz(100.0)));
//! let config = solve(&profile, &request).unwrap();
//! assert_eq!(config.vco_freq().mhz(), 300.0);
//! assert_eq!(config.output(0).unwrap().divider, 3);
//! ```
//!
//! [`plan`] and [`plan_all`] wrap the solver for build tooling: they report
//! one diagnostic per clocking block into a shared
//! [`DiagnosticSink`](pllplan_diagnostics::DiagnosticSink), and `plan_all`
//! plans independent blocks in parallel.

#![warn(missing_docs)]

pub mod error;
pub mod report;
pub mod request;
pub mod search;
pub mod solution;

pub use error::PlanningError;
pub use report::{plan, plan_all, PlanJob, APPROXIMATE, APPROXIMATE_ABOVE, PLANNED};
pub use request::{ClockRequest, OutputSpec, DEFAULT_DUTY_CYCLE};
pub use search::{solve, SEARCH_BUDGET};
pub use solution::{OutputConfig, SolvedConfiguration};
