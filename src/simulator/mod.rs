//! Headless simulator for balance checks.
//!
//! Plays many runs with a scripted autopilot through the real frame loop
//! and summarises scores, run lengths and the obstacle mix.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::Autopilot;
pub use config::SimConfig;
pub use report::{RunRecord, SimReport};
pub use runner::run_simulation;
