//! 链路类型
//!
//! 定义有向链路、链路 QoS 指标及其拥塞权重计算。

use serde::{Deserialize, Serialize};

use super::id::{PortNo, SwitchId};

/// 拓扑重置时使用的链路默认值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkDefaults {
    /// 名义容量（Mbps），用于计算利用率
    pub capacity_mbps: f64,
    pub delay_ms: f64,
    pub bandwidth_mbps: f64,
    pub loss_pct: f64,
}

impl Default for LinkDefaults {
    fn default() -> Self {
        Self {
            capacity_mbps: 100.0,
            delay_ms: 10.0,
            bandwidth_mbps: 100.0,
            loss_pct: 0.1,
        }
    }
}

/// QoS 路由使用的链路指标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkMetrics {
    pub delay_ms: f64,
    pub bandwidth_mbps: f64,
    pub loss_pct: f64,
}

/// 网络链路（有向）
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub src: SwitchId,
    pub dst: SwitchId,
    /// src 上朝向 dst 的端口
    pub egress_port: PortNo,
    pub capacity_mbps: f64,
    pub metrics: LinkMetrics,
    load: u64,
    weight: f64,
}

impl Link {
    /// 创建新链路，负载为 0
    pub fn new(
        src: SwitchId,
        dst: SwitchId,
        egress_port: PortNo,
        capacity_mbps: f64,
        metrics: LinkMetrics,
    ) -> Self {
        Self {
            src,
            dst,
            egress_port,
            capacity_mbps,
            metrics,
            load: 0,
            weight: congestion_weight(0, capacity_mbps),
        }
    }

    /// 当前经过该链路的路径数
    pub fn load(&self) -> u64 {
        self.load
    }

    /// 由负载推导出的代价，范围 [1, 11]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// 只能经由 `TopologyGraph::record_load_increase` 调用
    pub(super) fn add_load(&mut self, delta: u64) {
        self.load = self.load.saturating_add(delta);
        self.weight = congestion_weight(self.load, self.capacity_mbps);
    }
}

/// `1 + 10 * min(load / capacity, 1)`
pub fn congestion_weight(load: u64, capacity_mbps: f64) -> f64 {
    if capacity_mbps <= 0.0 {
        return 11.0;
    }
    let utilization = (load as f64 / capacity_mbps).min(1.0);
    1.0 + utilization * 10.0
}
