//! 控制器事件
//!
//! 交换机代理与拓扑服务上报的三类事件。

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::flow::OutputAction;
use crate::net::{Frame, LinkSpec, PortNo, SwitchId};
use crate::route::Path;

/// 交换机上送的一个帧
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameIn {
    pub switch: SwitchId,
    pub in_port: PortNo,
    pub frame: Frame,
    /// 交换机缓存编号；`None` 表示帧未缓存，需要回送原始字节
    pub buffer_id: Option<u32>,
}

/// 控制器事件
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    SwitchConnected {
        switch: SwitchId,
    },
    FrameIn(FrameIn),
    /// 完整的拓扑快照，触发整体重置
    TopologyChanged {
        switches: Vec<SwitchId>,
        links: Vec<LinkSpec>,
    },
}

/// 事件类别，作为分发表的键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SwitchConnected,
    FrameIn,
    TopologyChanged,
}

impl ControllerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ControllerEvent::SwitchConnected { .. } => EventKind::SwitchConnected,
            ControllerEvent::FrameIn(_) => EventKind::FrameIn,
            ControllerEvent::TopologyChanged { .. } => EventKind::TopologyChanged,
        }
    }
}

/// Flood 的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FloodReason {
    /// 目的主机未知
    UnknownDestination,
    /// 选路或下发失败，降级为 Flood
    Degraded(Error),
}

/// 控制器对一个帧做出的决定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// 拓扑控制流量，丢弃
    Ignored,
    Flood(FloodReason),
    Forward { port: PortNo, path: Path },
}

impl Decision {
    /// 帧的输出动作；`Ignored` 时不发送
    pub fn action(&self) -> Option<OutputAction> {
        match self {
            Decision::Ignored => None,
            Decision::Flood(_) => Some(OutputAction::Flood),
            Decision::Forward { port, .. } => Some(OutputAction::Port(*port)),
        }
    }

    pub fn is_flood(&self) -> bool {
        matches!(self, Decision::Flood(_))
    }
}
