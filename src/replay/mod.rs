//! Scenario replay: drive the controller core from a JSON event script.

mod runner;
mod scenario;

pub use runner::{DecisionRecord, LinkLoad, ReplayOutcome, run_scenario};
pub use scenario::{EventSpec, SCHEMA_VERSION, ScenarioSpec, TopologySpec};
