//! 路径类型

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::net::{SwitchId, TopologyGraph};

/// 交换机序列；相邻两个交换机之间必须有链路
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<SwitchId>);

impl Path {
    pub fn new(switches: Vec<SwitchId>) -> Self {
        debug_assert!(!switches.is_empty(), "path must contain at least one switch");
        Path(switches)
    }

    pub fn switches(&self) -> &[SwitchId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 跳数（链路数）
    pub fn hops(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<SwitchId> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<SwitchId> {
        self.0.last().copied()
    }

    /// 依次经过的 (src, dst) 链路
    pub fn links(&self) -> impl Iterator<Item = (SwitchId, SwitchId)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// 每一对相邻交换机都是图中的链路
    pub fn is_valid_in(&self, graph: &TopologyGraph) -> bool {
        !self.0.is_empty()
            && self.0.iter().all(|s| graph.contains_switch(*s))
            && self.links().all(|(a, b)| graph.link(a, b).is_some())
    }

    /// 路径上所有链路负载之和
    pub fn total_load(&self, graph: &TopologyGraph) -> u64 {
        self.links()
            .filter_map(|(a, b)| graph.link(a, b))
            .map(|l| l.load())
            .sum()
    }

    pub fn into_inner(self) -> Vec<SwitchId> {
        self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

impl From<Vec<SwitchId>> for Path {
    fn from(v: Vec<SwitchId>) -> Self {
        Path::new(v)
    }
}
