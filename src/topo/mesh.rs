//! 4 交换机网状拓扑构建
//!
//! ```text
//! h1 --- s1 --- s2 --- h2
//!         |  \ /  |
//!         |   X   |
//!         |  / \  |
//! h3 --- s3 --- s4 --- h4
//! ```

use super::snapshot::TopologySnapshot;

pub fn build_mesh4() -> TopologySnapshot {
    let mut t = TopologySnapshot::new();
    let s: Vec<_> = (1..=4).map(|i| t.add_switch(i)).collect();

    // (a, b, 时延 ms, 带宽 Mbps)
    let links = [
        (0, 1, 10.0, 50.0),
        (0, 2, 15.0, 30.0),
        (0, 3, 20.0, 20.0),
        (1, 3, 12.0, 40.0),
        (2, 3, 18.0, 35.0),
        (1, 2, 25.0, 25.0),
    ];
    for (a, b, delay, bw) in links {
        t.connect_with(s[a], s[b], delay, bw, 0.0);
    }
    t
}
