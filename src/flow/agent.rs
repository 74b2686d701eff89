//! South-bound switch agent interface.
//!
//! The core only emits requests; encoding, sessions and acknowledgements
//! belong to the agent. Every call is fire-and-forget.

use serde::{Deserialize, Serialize};

use super::rule::{FlowRule, PacketOut};

/// Minimal switch-agent API used by the controller core.
pub trait SwitchAgent {
    fn install_rule(&mut self, rule: FlowRule);
    fn send_frame(&mut self, out: PacketOut);
}

/// A request emitted towards the switch agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentMessage {
    InstallRule(FlowRule),
    SendFrame(PacketOut),
}

/// Agent that keeps every request in order, for replay output and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingAgent {
    pub messages: Vec<AgentMessage>,
}

impl RecordingAgent {
    pub fn rules(&self) -> impl Iterator<Item = &FlowRule> {
        self.messages.iter().filter_map(|m| match m {
            AgentMessage::InstallRule(r) => Some(r),
            AgentMessage::SendFrame(_) => None,
        })
    }

    pub fn packet_outs(&self) -> impl Iterator<Item = &PacketOut> {
        self.messages.iter().filter_map(|m| match m {
            AgentMessage::SendFrame(p) => Some(p),
            AgentMessage::InstallRule(_) => None,
        })
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl SwitchAgent for RecordingAgent {
    fn install_rule(&mut self, rule: FlowRule) {
        self.messages.push(AgentMessage::InstallRule(rule));
    }

    fn send_frame(&mut self, out: PacketOut) {
        self.messages.push(AgentMessage::SendFrame(out));
    }
}
