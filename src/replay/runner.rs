use serde::{Deserialize, Serialize};
use tracing::info;

use super::scenario::ScenarioSpec;
use crate::ctl::{ControllerConfig, ControllerCore, Decision, Dispatched, EventLoop, FloodReason};
use crate::flow::{AgentMessage, RecordingAgent};
use crate::net::{PortNo, StatsReport, SwitchId};

/// Serializable summary of one frame decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub seq: u64,
    /// `forward`, `flood` or `ignored`
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<PortNo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<SwitchId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl DecisionRecord {
    fn new(seq: u64, decision: &Decision) -> Self {
        match decision {
            Decision::Ignored => Self {
                seq,
                action: "ignored".into(),
                port: None,
                path: Vec::new(),
                reason: None,
            },
            Decision::Flood(reason) => Self {
                seq,
                action: "flood".into(),
                port: None,
                path: Vec::new(),
                reason: Some(match reason {
                    FloodReason::UnknownDestination => "unknown destination".into(),
                    FloodReason::Degraded(err) => err.to_string(),
                }),
            },
            Decision::Forward { port, path } => Self {
                seq,
                action: "forward".into(),
                port: Some(*port),
                path: path.switches().to_vec(),
                reason: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkLoad {
    pub src: SwitchId,
    pub dst: SwitchId,
    pub load: u64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayOutcome {
    pub decisions: Vec<DecisionRecord>,
    pub messages: Vec<AgentMessage>,
    pub link_loads: Vec<LinkLoad>,
    pub stats: StatsReport,
}

/// Feed a scenario through a fresh controller and collect everything it emitted.
pub fn run_scenario(spec: &ScenarioSpec, config: ControllerConfig) -> ReplayOutcome {
    let mut lp = EventLoop::new(ControllerCore::new(config), RecordingAgent::default());
    for ev in spec.to_events() {
        lp.push(ev);
    }
    let dispatched = lp.run();
    let decisions = collect_decisions(&dispatched);

    let (core, agent) = lp.into_parts();
    let link_loads = core
        .graph()
        .links()
        .map(|l| LinkLoad {
            src: l.src,
            dst: l.dst,
            load: l.load(),
            weight: l.weight(),
        })
        .collect();
    let stats = core.stats();
    info!(
        frames = stats.frames_processed,
        rules = stats.rules_installed,
        "replay finished"
    );
    ReplayOutcome {
        decisions,
        messages: agent.messages,
        link_loads,
        stats,
    }
}

fn collect_decisions(dispatched: &[Dispatched]) -> Vec<DecisionRecord> {
    dispatched
        .iter()
        .filter_map(|d| d.decision.as_ref().map(|dec| DecisionRecord::new(d.seq, dec)))
        .collect()
}
