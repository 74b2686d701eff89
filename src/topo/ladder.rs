//! 8 交换机梯形拓扑构建
//!
//! ```text
//! s1---s2
//! |\ /|
//! | X |
//! |/ \|
//! s3---s4
//!  ...
//! s7---s8
//! ```
//!
//! 横向链路快（5ms/100Mbps），纵向中速（10ms/50Mbps），
//! 交叉链路慢且有丢包（20ms/30Mbps/1%）。

use super::snapshot::TopologySnapshot;

pub fn build_ladder8() -> TopologySnapshot {
    let mut t = TopologySnapshot::new();
    let s: Vec<_> = (1..=8).map(|i| t.add_switch(i)).collect();

    for row in 0..4 {
        t.connect_with(s[2 * row], s[2 * row + 1], 5.0, 100.0, 0.0);
    }
    for row in 0..3 {
        let (l, r) = (2 * row, 2 * row + 1);
        t.connect_with(s[l], s[l + 2], 10.0, 50.0, 0.0);
        t.connect_with(s[r], s[r + 2], 10.0, 50.0, 0.0);
    }
    for row in 0..3 {
        let (l, r) = (2 * row, 2 * row + 1);
        t.connect_with(s[l], s[r + 2], 20.0, 30.0, 1.0);
        t.connect_with(s[r], s[l + 2], 20.0, 30.0, 1.0);
    }
    t
}
