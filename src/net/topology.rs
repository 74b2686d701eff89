//! 拓扑图
//!
//! 交换机与有向链路组成的图，链路上携带负载与 QoS 指标。
//! 拓扑变化时整体重建（不做增量合并），负载随之清零。

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::id::{PortNo, SwitchId};
use super::link::{Link, LinkDefaults, LinkMetrics};
use crate::error::Error;

/// 拓扑服务上报的一条链路：(src, src_port, dst)，可选地附带指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub src: SwitchId,
    pub src_port: PortNo,
    pub dst: SwitchId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_mbps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth_mbps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_pct: Option<f64>,
}

impl LinkSpec {
    /// 只带端口信息的链路，指标全部取默认值
    pub fn new(src: SwitchId, src_port: PortNo, dst: SwitchId) -> Self {
        Self {
            src,
            src_port,
            dst,
            capacity_mbps: None,
            delay_ms: None,
            bandwidth_mbps: None,
            loss_pct: None,
        }
    }

    pub fn with_metrics(mut self, delay_ms: f64, bandwidth_mbps: f64, loss_pct: f64) -> Self {
        self.delay_ms = Some(delay_ms);
        self.bandwidth_mbps = Some(bandwidth_mbps);
        self.loss_pct = Some(loss_pct);
        self
    }

    pub fn with_capacity(mut self, capacity_mbps: f64) -> Self {
        self.capacity_mbps = Some(capacity_mbps);
        self
    }

    fn to_link(&self, defaults: &LinkDefaults) -> Link {
        let metrics = LinkMetrics {
            delay_ms: self.delay_ms.unwrap_or(defaults.delay_ms),
            bandwidth_mbps: self.bandwidth_mbps.unwrap_or(defaults.bandwidth_mbps),
            loss_pct: self.loss_pct.unwrap_or(defaults.loss_pct),
        };
        Link::new(
            self.src,
            self.dst,
            self.src_port,
            self.capacity_mbps.unwrap_or(defaults.capacity_mbps),
            metrics,
        )
    }
}

/// 拓扑图
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologyGraph {
    switches: BTreeSet<SwitchId>,
    /// (src, dst) -> link；按键有序，邻居遍历顺序因此是确定的
    links: BTreeMap<(SwitchId, SwitchId), Link>,
}

impl TopologyGraph {
    /// 由一次完整的拓扑快照构造新图
    ///
    /// 链路端点即使不在 `switches` 中也会加入节点集合；同一 (src, dst) 重复出现时后者覆盖前者。
    pub fn build(switches: &[SwitchId], links: &[LinkSpec], defaults: &LinkDefaults) -> Self {
        let mut graph = TopologyGraph::default();
        graph.switches.extend(switches.iter().copied());
        for spec in links {
            graph.switches.insert(spec.src);
            graph.switches.insert(spec.dst);
            let link = spec.to_link(defaults);
            trace!(src = %spec.src, dst = %spec.dst, port = %spec.src_port, "添加链路");
            graph.links.insert((spec.src, spec.dst), link);
        }
        debug!(
            switches = graph.switches.len(),
            links = graph.links.len(),
            "构建拓扑图"
        );
        graph
    }

    /// 用新快照整体替换节点与链路，所有负载归零
    pub fn reset_topology(
        &mut self,
        switches: &[SwitchId],
        links: &[LinkSpec],
        defaults: &LinkDefaults,
    ) {
        *self = TopologyGraph::build(switches, links, defaults);
        info!(
            switches = self.switches.len(),
            links = self.links.len(),
            "🗺️  拓扑已重置"
        );
    }

    /// 为已存在的链路增加负载并重算权重
    ///
    /// 链路不存在时静默忽略（拓扑可能在路径计算之后已变化），返回是否生效。
    pub fn record_load_increase(&mut self, src: SwitchId, dst: SwitchId, delta: u64) -> bool {
        match self.links.get_mut(&(src, dst)) {
            Some(link) => {
                link.add_load(delta);
                trace!(
                    src = %src,
                    dst = %dst,
                    load = link.load(),
                    weight = link.weight(),
                    "更新链路负载"
                );
                true
            }
            None => {
                debug!(src = %src, dst = %dst, "链路不存在，忽略负载更新");
                false
            }
        }
    }

    /// src 上朝向 dst 的出端口
    pub fn neighbor_port(&self, src: SwitchId, dst: SwitchId) -> Result<PortNo, Error> {
        self.links
            .get(&(src, dst))
            .map(|l| l.egress_port)
            .ok_or(Error::NoSuchLink { src, dst })
    }

    pub fn contains_switch(&self, id: SwitchId) -> bool {
        self.switches.contains(&id)
    }

    pub fn link(&self, src: SwitchId, dst: SwitchId) -> Option<&Link> {
        self.links.get(&(src, dst))
    }

    /// src 的所有出边邻居，按交换机 id 升序
    pub fn neighbors(&self, src: SwitchId) -> impl Iterator<Item = SwitchId> + '_ {
        self.links
            .range((src, SwitchId(u64::MIN))..=(src, SwitchId(u64::MAX)))
            .map(|(&(_, dst), _)| dst)
    }

    pub fn switches(&self) -> impl Iterator<Item = SwitchId> + '_ {
        self.switches.iter().copied()
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> + '_ {
        self.links.values()
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// 所有链路的平均负载；没有链路时为 0
    pub fn average_link_load(&self) -> f64 {
        if self.links.is_empty() {
            return 0.0;
        }
        let total: u64 = self.links.values().map(Link::load).sum();
        total as f64 / self.links.len() as f64
    }
}
