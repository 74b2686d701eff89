//! 主机位置表
//!
//! 主机地址 -> (交换机, 端口)。每次观测都无条件覆盖，没有老化。

use std::collections::HashMap;

use tracing::{debug, trace};

use super::id::{MacAddr, PortNo, SwitchId};

/// 主机所在位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostLocation {
    pub switch: SwitchId,
    pub port: PortNo,
}

#[derive(Debug, Default, Clone)]
pub struct HostLocationTable {
    hosts: HashMap<MacAddr, HostLocation>,
}

impl HostLocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录主机位置；返回被覆盖的旧位置（如果位置发生了变化）
    pub fn learn(&mut self, host: MacAddr, switch: SwitchId, port: PortNo) -> Option<HostLocation> {
        let loc = HostLocation { switch, port };
        let prev = self.hosts.insert(host, loc);
        match prev {
            Some(old) if old != loc => {
                debug!(host = %host, from = ?old, to = ?loc, "主机迁移");
                Some(old)
            }
            Some(_) => None,
            None => {
                trace!(host = %host, switch = %switch, port = %port, "学习到新主机");
                None
            }
        }
    }

    pub fn lookup(&self, host: &MacAddr) -> Option<HostLocation> {
        self.hosts.get(host).copied()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MacAddr, &HostLocation)> {
        self.hosts.iter()
    }
}
