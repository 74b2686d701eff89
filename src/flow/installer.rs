//! 路径下发
//!
//! 把选中的路径变成逐跳规则，同时把负载写回拓扑图，
//! 使同一批次后续的选路能看到更新后的拥塞情况。

use tracing::{debug, info};

use super::agent::SwitchAgent;
use super::rule::{FlowRequest, FlowRule, OutputAction, RuleMatch};
use crate::error::Error;
use crate::net::{PortNo, TopologyGraph};

/// 下发结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallOutcome {
    /// 发出的规则条数（每个交换机一条）
    pub rules: usize,
    /// 第一个交换机的出端口
    pub first_hop_port: PortNo,
}

/// 在路径上的每个交换机下发一条规则
///
/// - 路径少于两个交换机时不做任何事，返回 `PathTooShort`；
/// - 先解析全部出端口，任一链路缺失则返回 `NoSuchLink`，此时负载与规则都不变；
/// - 首个交换机匹配 (入端口, 目的主机)，其余只匹配目的主机；
/// - 最后一个交换机的出端口取调用方给出的主机端口，而不是从图里推导。
#[tracing::instrument(skip(graph, agent, req), fields(path = %req.path, dst = %req.key.dst))]
pub fn install(
    graph: &mut TopologyGraph,
    agent: &mut dyn SwitchAgent,
    req: &FlowRequest,
) -> Result<InstallOutcome, Error> {
    let switches = req.path.switches();
    if switches.len() < 2 {
        debug!(len = switches.len(), "路径过短，跳过下发");
        return Err(Error::PathTooShort {
            len: switches.len(),
        });
    }

    let ports = req
        .path
        .links()
        .map(|(a, b)| graph.neighbor_port(a, b))
        .collect::<Result<Vec<_>, _>>()?;

    for (a, b) in req.path.links() {
        graph.record_load_increase(a, b, 1);
    }

    let last = switches.len() - 1;
    for (i, &switch) in switches.iter().enumerate() {
        let (rule_match, out) = if i == 0 {
            (RuleMatch::in_port_dst(req.key.in_port, req.key.dst), ports[0])
        } else if i == last {
            (RuleMatch::dst(req.key.dst), req.egress_port)
        } else {
            (RuleMatch::dst(req.key.dst), ports[i])
        };
        agent.install_rule(FlowRule {
            switch,
            rule_match,
            action: OutputAction::Port(out),
            priority: req.priority,
            idle_timeout: req.idle_timeout,
            hard_timeout: req.hard_timeout,
        });
    }

    info!(rules = switches.len(), "🛣️  路径已下发");
    Ok(InstallOutcome {
        rules: switches.len(),
        first_hop_port: ports[0],
    })
}
