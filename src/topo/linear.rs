//! 线形拓扑构建

use super::snapshot::TopologySnapshot;

/// 构建 s1 <-> s2 <-> ... <-> sn，链路指标取默认值
pub fn build_linear(n: u64) -> TopologySnapshot {
    let mut t = TopologySnapshot::new();
    let mut prev = None;
    for i in 1..=n {
        let s = t.add_switch(i);
        if let Some(p) = prev {
            t.connect(p, s);
        }
        prev = Some(s);
    }
    t
}
