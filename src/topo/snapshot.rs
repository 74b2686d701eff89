//! 拓扑快照构建器

use std::collections::BTreeMap;

use crate::ctl::ControllerEvent;
use crate::net::{LinkSpec, PortNo, SwitchId};

/// 主机所连端口
pub const HOST_PORT: PortNo = PortNo(1);

/// 一次完整的拓扑快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologySnapshot {
    pub switches: Vec<SwitchId>,
    pub links: Vec<LinkSpec>,
    next_port: BTreeMap<SwitchId, u32>,
}

impl TopologySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接由交换机与链路列表构造（端口由调用方给定）
    pub fn from_parts(switches: Vec<SwitchId>, links: Vec<LinkSpec>) -> Self {
        Self {
            switches,
            links,
            next_port: BTreeMap::new(),
        }
    }

    pub fn add_switch(&mut self, id: u64) -> SwitchId {
        let id = SwitchId(id);
        if !self.switches.contains(&id) {
            self.switches.push(id);
            self.next_port.insert(id, HOST_PORT.0 + 1);
        }
        id
    }

    fn alloc_port(&mut self, id: SwitchId) -> PortNo {
        let next = self.next_port.entry(id).or_insert(HOST_PORT.0 + 1);
        let port = PortNo(*next);
        *next += 1;
        port
    }

    /// 连接两个交换机（创建两条单向链路），指标取默认值
    pub fn connect(&mut self, a: SwitchId, b: SwitchId) -> (PortNo, PortNo) {
        let pa = self.alloc_port(a);
        let pb = self.alloc_port(b);
        self.links.push(LinkSpec::new(a, pa, b));
        self.links.push(LinkSpec::new(b, pb, a));
        (pa, pb)
    }

    /// 连接两个交换机并为两个方向设置相同的指标
    pub fn connect_with(
        &mut self,
        a: SwitchId,
        b: SwitchId,
        delay_ms: f64,
        bandwidth_mbps: f64,
        loss_pct: f64,
    ) -> (PortNo, PortNo) {
        let pa = self.alloc_port(a);
        let pb = self.alloc_port(b);
        self.links
            .push(LinkSpec::new(a, pa, b).with_metrics(delay_ms, bandwidth_mbps, loss_pct));
        self.links
            .push(LinkSpec::new(b, pb, a).with_metrics(delay_ms, bandwidth_mbps, loss_pct));
        (pa, pb)
    }

    /// a 上朝向 b 的端口
    pub fn port(&self, a: SwitchId, b: SwitchId) -> Option<PortNo> {
        self.links
            .iter()
            .find(|l| l.src == a && l.dst == b)
            .map(|l| l.src_port)
    }

    pub fn to_event(&self) -> ControllerEvent {
        ControllerEvent::TopologyChanged {
            switches: self.switches.clone(),
            links: self.links.clone(),
        }
    }
}
