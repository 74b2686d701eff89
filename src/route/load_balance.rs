//! 负载均衡策略
//!
//! 候选路径按链路负载之和排序，取最小者。
//! 并列时依次比较跳数与交换机序列（字典序），保证结果可复现。

use super::path::Path;
use crate::net::TopologyGraph;

/// 选出总负载最小的候选路径，返回 (路径, 总负载)
pub fn least_loaded(graph: &TopologyGraph, candidates: Vec<Path>) -> Option<(Path, u64)> {
    candidates
        .into_iter()
        .map(|p| {
            let load = p.total_load(graph);
            (p, load)
        })
        .min_by(|(a, la), (b, lb)| {
            la.cmp(lb)
                .then(a.hops().cmp(&b.hops()))
                .then_with(|| a.cmp(b))
        })
}
