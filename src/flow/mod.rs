//! 流表下发模块
//!
//! 规则类型、交换机代理接口与逐跳下发逻辑。

mod agent;
mod installer;
mod rule;

pub use agent::{AgentMessage, RecordingAgent, SwitchAgent};
pub use installer::{InstallOutcome, install};
pub use rule::{
    FlowRequest, FlowRule, FramePayload, MatchKey, OutputAction, PacketOut, RuleMatch,
};
