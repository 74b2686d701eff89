//! 统计信息
//!
//! 控制器对外暴露的只读计数器。

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// 控制器运行计数
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub frames_processed: u64,
    pub rules_installed: u64,
    pub path_computations: u64,
    pub load_balanced_paths: u64,
    pub qos_violations: u64,
    pub high_priority_flows: u64,
    pub switches_connected: u64,
}

/// 某一时刻的统计快照（可序列化输出）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub frames_processed: u64,
    pub rules_installed: u64,
    pub path_computations: u64,
    pub load_balanced_paths: u64,
    pub qos_violations: u64,
    pub high_priority_flows: u64,
    pub switches_connected: u64,
    pub elapsed_secs: f64,
    pub frames_per_second: f64,
    pub average_link_load: f64,
}

impl Stats {
    pub fn report(&self, started_at: Instant, average_link_load: f64) -> StatsReport {
        let elapsed_secs = started_at.elapsed().as_secs_f64();
        let frames_per_second = if elapsed_secs > 0.0 {
            self.frames_processed as f64 / elapsed_secs
        } else {
            0.0
        };
        StatsReport {
            frames_processed: self.frames_processed,
            rules_installed: self.rules_installed,
            path_computations: self.path_computations,
            load_balanced_paths: self.load_balanced_paths,
            qos_violations: self.qos_violations,
            high_priority_flows: self.high_priority_flows,
            switches_connected: self.switches_connected,
            elapsed_secs,
            frames_per_second,
            average_link_load,
        }
    }
}
