//! 流表规则与下行请求

use serde::{Deserialize, Serialize};

use crate::net::{MacAddr, PortNo, SwitchId};
use crate::route::Path;

/// 规则的输出动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "port", rename_all = "snake_case")]
pub enum OutputAction {
    Port(PortNo),
    /// 除入端口外的所有端口
    Flood,
    /// 上送控制器
    Controller,
}

/// 规则匹配字段；`None` 表示通配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RuleMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_port: Option<PortNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_dst: Option<MacAddr>,
}

impl RuleMatch {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn dst(eth_dst: MacAddr) -> Self {
        Self {
            in_port: None,
            eth_dst: Some(eth_dst),
        }
    }

    pub fn in_port_dst(in_port: PortNo, eth_dst: MacAddr) -> Self {
        Self {
            in_port: Some(in_port),
            eth_dst: Some(eth_dst),
        }
    }
}

/// 交换机上的一条转发规则
///
/// 同一 (switch, match, priority) 的规则由交换机代理覆盖旧规则。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowRule {
    pub switch: SwitchId,
    #[serde(rename = "match")]
    pub rule_match: RuleMatch,
    pub action: OutputAction,
    pub priority: u16,
    /// 秒；0 表示不超时
    pub idle_timeout: u16,
    pub hard_timeout: u16,
}

/// 流的匹配键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchKey {
    pub src: MacAddr,
    pub dst: MacAddr,
    pub in_port: PortNo,
}

/// 一次路径下发请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRequest {
    pub path: Path,
    pub key: MatchKey,
    /// 最后一跳交换机上朝向目的主机的端口
    pub egress_port: PortNo,
    pub priority: u16,
    pub idle_timeout: u16,
    pub hard_timeout: u16,
}

/// packet-out 的载荷：交换机缓存编号或原始字节
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FramePayload {
    Buffer(u32),
    Data(Vec<u8>),
}

/// 让交换机把一个帧从指定动作发出
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketOut {
    pub switch: SwitchId,
    pub in_port: PortNo,
    pub payload: FramePayload,
    pub action: OutputAction,
}
