//! 控制器核心
//!
//! 逐个处理事件：学习主机位置、选路、下发、决定触发帧的去向。
//! 选路与下发中的任何错误都在这里降级为 Flood，不会抛给调用方。

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{debug, info, trace};

use super::config::{ControllerConfig, RoutingPolicy};
use super::event::{Decision, FloodReason, FrameIn};
use crate::error::Error;
use crate::flow::{
    self, FlowRequest, FlowRule, FramePayload, MatchKey, OutputAction, PacketOut, RuleMatch,
    SwitchAgent,
};
use crate::net::{Frame, HostLocationTable, LinkSpec, Stats, StatsReport, SwitchId, TopologyGraph};
use crate::route::{PathSelector, QosRequirement, Strategy};

/// 反应式控制器核心：拥有拓扑图与主机位置表
#[derive(Debug)]
pub struct ControllerCore {
    config: ControllerConfig,
    selector: PathSelector,
    graph: TopologyGraph,
    hosts: HostLocationTable,
    connected: BTreeSet<SwitchId>,
    stats: Stats,
    started_at: Instant,
}

impl ControllerCore {
    pub fn new(config: ControllerConfig) -> Self {
        info!(policy = ?config.policy, max_hops = config.max_hops, "🚀 控制器初始化");
        Self {
            selector: config.selector(),
            config,
            graph: TopologyGraph::default(),
            hosts: HostLocationTable::new(),
            connected: BTreeSet::new(),
            stats: Stats::default(),
            started_at: Instant::now(),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    pub fn hosts(&self) -> &HostLocationTable {
        &self.hosts
    }

    pub fn counters(&self) -> Stats {
        self.stats
    }

    pub fn connected_switches(&self) -> impl Iterator<Item = SwitchId> + '_ {
        self.connected.iter().copied()
    }

    /// 只读统计快照
    pub fn stats(&self) -> StatsReport {
        self.stats
            .report(self.started_at, self.graph.average_link_load())
    }

    /// 交换机接入：下发 table-miss 规则（优先级 0，全匹配，上送控制器）
    pub fn on_switch_connected(&mut self, switch: SwitchId, agent: &mut dyn SwitchAgent) {
        if self.connected.insert(switch) {
            self.stats.switches_connected += 1;
        }
        agent.install_rule(FlowRule {
            switch,
            rule_match: RuleMatch::any(),
            action: OutputAction::Controller,
            priority: 0,
            idle_timeout: 0,
            hard_timeout: 0,
        });
        self.stats.rules_installed += 1;
        info!(switch = %switch, "🔌 交换机已连接");
    }

    /// 拓扑变化：用新快照整体替换旧图
    pub fn on_topology_changed(&mut self, switches: &[SwitchId], links: &[LinkSpec]) {
        let prev_links = self.graph.link_count();
        self.graph
            .reset_topology(switches, links, &self.config.link_defaults);
        debug!(prev_links, hosts = self.hosts.len(), "旧图已丢弃，负载清零");
    }

    /// 处理一个上送帧，并通过代理把它发出
    #[tracing::instrument(skip(self, ev, agent), fields(switch = %ev.switch, in_port = %ev.in_port, src = %ev.frame.src, dst = %ev.frame.dst))]
    pub fn on_frame_in(&mut self, ev: FrameIn, agent: &mut dyn SwitchAgent) -> Decision {
        if ev.frame.is_topology_control() {
            trace!("拓扑发现帧，丢弃");
            return Decision::Ignored;
        }
        self.stats.frames_processed += 1;
        self.hosts.learn(ev.frame.src, ev.switch, ev.in_port);

        let (strategy, priority) = self.strategy_for(&ev.frame);
        let decision = match self.route(&ev, strategy, priority, agent) {
            Ok(d) => d,
            Err(err) => {
                debug!(%err, "选路失败，降级为 Flood");
                Decision::Flood(FloodReason::Degraded(err))
            }
        };

        if let Some(action) = decision.action() {
            let payload = match ev.buffer_id {
                Some(id) => FramePayload::Buffer(id),
                None => FramePayload::Data(ev.frame.data),
            };
            agent.send_frame(PacketOut {
                switch: ev.switch,
                in_port: ev.in_port,
                payload,
                action,
            });
        }
        decision
    }

    /// 按控制器变体决定策略与规则优先级
    fn strategy_for(&mut self, frame: &Frame) -> (Strategy, u16) {
        let settings = self.config.flow();
        match self.config.policy {
            RoutingPolicy::LoadBalancing => (Strategy::LoadBalancing, settings.priority),
            RoutingPolicy::Qos => {
                let req = QosRequirement::for_frame(frame);
                if req.is_high_priority() {
                    self.stats.high_priority_flows += 1;
                    (Strategy::Qos(req), settings.high_priority)
                } else {
                    (Strategy::Qos(req), settings.priority)
                }
            }
        }
    }

    fn route(
        &mut self,
        ev: &FrameIn,
        strategy: Strategy,
        priority: u16,
        agent: &mut dyn SwitchAgent,
    ) -> Result<Decision, Error> {
        let Some(loc) = self.hosts.lookup(&ev.frame.dst) else {
            debug!("目的主机未知");
            return Ok(Decision::Flood(FloodReason::UnknownDestination));
        };
        if !self.graph.contains_switch(ev.switch) {
            return Err(Error::UnknownSwitch { switch: ev.switch });
        }
        if !self.graph.contains_switch(loc.switch) {
            return Err(Error::StaleBinding {
                host: ev.frame.dst,
                switch: loc.switch,
            });
        }

        self.stats.path_computations += 1;
        let selection = self
            .selector
            .select_path(&self.graph, ev.switch, loc.switch, strategy)?;
        if selection.load_balanced() {
            self.stats.load_balanced_paths += 1;
        }
        if selection.qos_violation() {
            self.stats.qos_violations += 1;
        }

        let settings = self.config.flow();
        let req = FlowRequest {
            path: selection.path,
            key: MatchKey {
                src: ev.frame.src,
                dst: ev.frame.dst,
                in_port: ev.in_port,
            },
            egress_port: loc.port,
            priority,
            idle_timeout: settings.idle_timeout_s,
            hard_timeout: settings.hard_timeout_s,
        };
        match flow::install(&mut self.graph, agent, &req) {
            Ok(out) => {
                self.stats.rules_installed += out.rules as u64;
                Ok(Decision::Forward {
                    port: out.first_hop_port,
                    path: req.path,
                })
            }
            // 源与目的在同一交换机：不下发规则，直接发往主机端口
            Err(Error::PathTooShort { .. }) => Ok(Decision::Forward {
                port: loc.port,
                path: req.path,
            }),
            Err(e) => Err(e),
        }
    }
}
