//! 路径枚举
//!
//! 两种策略共用的底层搜索：跳数上限内的全部简单路径（DFS），
//! 以及枚举为空时回退使用的最短跳数路径（BFS）。
//! 邻居按交换机 id 升序遍历，因此结果顺序是确定的。

use std::collections::{BTreeMap, VecDeque};

use super::path::Path;
use crate::net::{SwitchId, TopologyGraph};

/// 枚举 src 到 dst 的所有简单路径，路径最多 `max_hops` 条链路
///
/// src == dst 或任一端点不在图中时返回空。
pub fn simple_paths(
    graph: &TopologyGraph,
    src: SwitchId,
    dst: SwitchId,
    max_hops: usize,
) -> Vec<Path> {
    let mut out = Vec::new();
    if src == dst || max_hops == 0 || !graph.contains_switch(src) || !graph.contains_switch(dst) {
        return out;
    }
    let mut stack = vec![src];
    walk(graph, dst, max_hops, &mut stack, &mut out);
    out
}

fn walk(
    graph: &TopologyGraph,
    dst: SwitchId,
    max_hops: usize,
    stack: &mut Vec<SwitchId>,
    out: &mut Vec<Path>,
) {
    let Some(&cur) = stack.last() else {
        return;
    };
    for next in graph.neighbors(cur) {
        if stack.contains(&next) {
            continue;
        }
        if next == dst {
            let mut p = stack.clone();
            p.push(dst);
            out.push(Path::new(p));
            continue;
        }
        // stack 中有 n 个节点，再走一步到 next、最后到 dst 至少需要 n + 1 跳
        if stack.len() < max_hops {
            stack.push(next);
            walk(graph, dst, max_hops, stack, out);
            stack.pop();
        }
    }
}

/// 最短跳数路径（不限跳数）
///
/// src == dst 且在图中时返回单节点路径。
pub fn shortest_path(graph: &TopologyGraph, src: SwitchId, dst: SwitchId) -> Option<Path> {
    if !graph.contains_switch(src) || !graph.contains_switch(dst) {
        return None;
    }
    if src == dst {
        return Some(Path::new(vec![src]));
    }

    let mut prev: BTreeMap<SwitchId, SwitchId> = BTreeMap::new();
    let mut q: VecDeque<SwitchId> = VecDeque::new();
    q.push_back(src);

    while let Some(v) = q.pop_front() {
        for next in graph.neighbors(v) {
            if next == src || prev.contains_key(&next) {
                continue;
            }
            prev.insert(next, v);
            if next == dst {
                let mut rev = vec![dst];
                let mut at = dst;
                while let Some(&p) = prev.get(&at) {
                    rev.push(p);
                    at = p;
                }
                rev.reverse();
                return Some(Path::new(rev));
            }
            q.push_back(next);
        }
    }
    None
}
