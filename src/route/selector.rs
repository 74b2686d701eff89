//! 路径选择器
//!
//! 两种策略共用同一套枚举与回退流程：
//! 1. 枚举跳数上限内的全部简单路径；
//! 2. 有候选时按策略排序取最优；
//! 3. 没有候选时回退到最短跳数路径，仍然没有则返回 `NoPathFound`（调用方应 Flood）。

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::load_balance::least_loaded;
use super::path::Path;
use super::qos::{PathQos, QosRequirement, best_for};
use super::search::{shortest_path, simple_paths};
use crate::error::Error;
use crate::net::{SwitchId, TopologyGraph};

pub const DEFAULT_MAX_HOPS: usize = 5;
pub const DEFAULT_QOS_DELAY_THRESHOLD_MS: f64 = 100.0;

/// 选路策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "requirement", rename_all = "snake_case")]
pub enum Strategy {
    LoadBalancing,
    Qos(QosRequirement),
}

/// 路径来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOrigin {
    /// 来自简单路径枚举
    Enumerated,
    /// 枚举为空，使用最短跳数路径
    ShortestFallback,
}

/// 对选中路径的评估
#[derive(Debug, Clone, PartialEq)]
pub enum Assessment {
    Load {
        total_load: u64,
        /// 最短跳数路径的总负载
        baseline_load: Option<u64>,
        /// 选中路径的负载严格低于基线
        load_balanced: bool,
    },
    Qos {
        requirement: QosRequirement,
        qos: PathQos,
        score: f64,
        /// 总时延超过阈值；只做观测，不阻止下发
        violation: bool,
    },
}

/// 一次选路的结果
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub path: Path,
    pub origin: PathOrigin,
    pub candidates: usize,
    pub assessment: Assessment,
}

impl Selection {
    pub fn load_balanced(&self) -> bool {
        matches!(
            self.assessment,
            Assessment::Load {
                load_balanced: true,
                ..
            }
        )
    }

    pub fn qos_violation(&self) -> bool {
        matches!(self.assessment, Assessment::Qos { violation: true, .. })
    }
}

/// 路径选择器：只读拓扑图
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSelector {
    max_hops: usize,
    qos_delay_threshold_ms: f64,
}

impl Default for PathSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HOPS, DEFAULT_QOS_DELAY_THRESHOLD_MS)
    }
}

impl PathSelector {
    pub fn new(max_hops: usize, qos_delay_threshold_ms: f64) -> Self {
        Self {
            max_hops,
            qos_delay_threshold_ms,
        }
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// 按策略为 (src, dst) 选路
    #[tracing::instrument(skip(self, graph))]
    pub fn select_path(
        &self,
        graph: &TopologyGraph,
        src: SwitchId,
        dst: SwitchId,
        strategy: Strategy,
    ) -> Result<Selection, Error> {
        let candidates = simple_paths(graph, src, dst, self.max_hops);
        let count = candidates.len();
        debug!(candidates = count, max_hops = self.max_hops, "枚举候选路径");

        let ranked = match strategy {
            Strategy::LoadBalancing => least_loaded(graph, candidates).map(|(p, _)| p),
            Strategy::Qos(req) => best_for(graph, candidates, req).map(|(p, _)| p),
        };
        let (path, origin) = match ranked {
            Some(p) => (p, PathOrigin::Enumerated),
            None => {
                debug!("没有候选路径，回退到最短跳数路径");
                let p = shortest_path(graph, src, dst).ok_or(Error::NoPathFound { src, dst })?;
                (p, PathOrigin::ShortestFallback)
            }
        };

        let assessment = match strategy {
            Strategy::LoadBalancing => self.assess_load(graph, &path, src, dst),
            Strategy::Qos(req) => self.assess_qos(graph, &path, req),
        };

        Ok(Selection {
            path,
            origin,
            candidates: count,
            assessment,
        })
    }

    fn assess_load(&self, graph: &TopologyGraph, path: &Path, src: SwitchId, dst: SwitchId) -> Assessment {
        let total_load = path.total_load(graph);
        let baseline_load = shortest_path(graph, src, dst).map(|p| p.total_load(graph));
        let load_balanced = baseline_load.is_some_and(|b| total_load < b);
        info!(path = %path, total_load, ?baseline_load, "⚖️  选中最小负载路径");
        Assessment::Load {
            total_load,
            baseline_load,
            load_balanced,
        }
    }

    fn assess_qos(&self, graph: &TopologyGraph, path: &Path, requirement: QosRequirement) -> Assessment {
        let qos = PathQos::of(path, graph);
        let score = qos.balanced_score();
        match requirement {
            QosRequirement::LowLatency => {
                info!(path = %path, delay_ms = qos.delay_ms, "选中低时延路径")
            }
            QosRequirement::HighBandwidth => {
                info!(path = %path, bandwidth_mbps = qos.bandwidth_mbps, "选中高带宽路径")
            }
            QosRequirement::Balanced => info!(path = %path, score, "选中均衡路径"),
        }
        let violation = qos.delay_ms > self.qos_delay_threshold_ms;
        if violation {
            warn!(
                path = %path,
                delay_ms = qos.delay_ms,
                threshold_ms = self.qos_delay_threshold_ms,
                "⚠️  QoS 违规：时延过高"
            );
        }
        Assessment::Qos {
            requirement,
            qos,
            score,
            violation,
        }
    }
}
