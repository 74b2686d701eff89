//! QoS 策略
//!
//! 每条候选路径计算总时延、瓶颈带宽与累计丢包率，再按需求打分。

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::path::Path;
use crate::net::{Frame, IP_PROTO_TCP, IP_PROTO_UDP, TopologyGraph};

/// QoS 优化目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QosRequirement {
    LowLatency,
    HighBandwidth,
    Balanced,
}

impl QosRequirement {
    /// TCP -> 高带宽，UDP -> 低时延，其余 -> 均衡
    pub fn for_frame(frame: &Frame) -> QosRequirement {
        match frame.transport_proto() {
            Some(IP_PROTO_TCP) => QosRequirement::HighBandwidth,
            Some(IP_PROTO_UDP) => QosRequirement::LowLatency,
            _ => QosRequirement::Balanced,
        }
    }

    /// 低时延与高带宽流量使用高优先级规则
    pub fn is_high_priority(self) -> bool {
        !matches!(self, QosRequirement::Balanced)
    }
}

/// 路径的聚合 QoS 指标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathQos {
    pub delay_ms: f64,
    /// 单节点路径没有链路，瓶颈带宽为正无穷
    pub bandwidth_mbps: f64,
    pub loss_pct: f64,
}

impl PathQos {
    /// 图中缺失的链路不计入
    pub fn of(path: &Path, graph: &TopologyGraph) -> PathQos {
        let mut qos = PathQos {
            delay_ms: 0.0,
            bandwidth_mbps: f64::INFINITY,
            loss_pct: 0.0,
        };
        for link in path.links().filter_map(|(a, b)| graph.link(a, b)) {
            qos.delay_ms += link.metrics.delay_ms;
            qos.bandwidth_mbps = qos.bandwidth_mbps.min(link.metrics.bandwidth_mbps);
            qos.loss_pct += link.metrics.loss_pct;
        }
        qos
    }

    /// 三项归一化得分的算术平均，越大越好
    pub fn balanced_score(&self) -> f64 {
        let delay_score = 1.0 / (1.0 + self.delay_ms / 100.0);
        let bandwidth_score = self.bandwidth_mbps / 100.0;
        let loss_score = 1.0 / (1.0 + self.loss_pct);
        (delay_score + bandwidth_score + loss_score) / 3.0
    }
}

/// 按需求选出最优候选路径
///
/// 并列时依次比较跳数与交换机序列（字典序）。
pub fn best_for(
    graph: &TopologyGraph,
    candidates: Vec<Path>,
    requirement: QosRequirement,
) -> Option<(Path, PathQos)> {
    candidates
        .into_iter()
        .map(|p| {
            let qos = PathQos::of(&p, graph);
            (p, qos)
        })
        .min_by(|(a, qa), (b, qb)| {
            rank(requirement, qa, qb)
                .then(a.hops().cmp(&b.hops()))
                .then_with(|| a.cmp(b))
        })
}

/// Less 表示 a 更优
fn rank(requirement: QosRequirement, a: &PathQos, b: &PathQos) -> Ordering {
    match requirement {
        QosRequirement::LowLatency => a.delay_ms.total_cmp(&b.delay_ms),
        QosRequirement::HighBandwidth => b.bandwidth_mbps.total_cmp(&a.bandwidth_mbps),
        QosRequirement::Balanced => b.balanced_score().total_cmp(&a.balanced_score()),
    }
}
