//! 控制器配置
//!
//! 所有字段都有默认值；`flow` 缺省时按控制器变体取不同的超时。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::net::LinkDefaults;
use crate::route::{DEFAULT_MAX_HOPS, DEFAULT_QOS_DELAY_THRESHOLD_MS, PathSelector};

/// 控制器变体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RoutingPolicy {
    #[default]
    LoadBalancing,
    Qos,
}

/// 下发规则使用的优先级与超时（秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSettings {
    pub priority: u16,
    /// QoS 变体中低时延/高带宽流量的优先级
    pub high_priority: u16,
    pub idle_timeout_s: u16,
    pub hard_timeout_s: u16,
}

impl FlowSettings {
    pub fn for_policy(policy: RoutingPolicy) -> Self {
        let (idle, hard) = match policy {
            RoutingPolicy::LoadBalancing => (10, 30),
            RoutingPolicy::Qos => (15, 45),
        };
        Self {
            priority: 1,
            high_priority: 2,
            idle_timeout_s: idle,
            hard_timeout_s: hard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub policy: RoutingPolicy,
    /// 简单路径枚举的跳数上限
    pub max_hops: usize,
    pub qos_delay_threshold_ms: f64,
    pub link_defaults: LinkDefaults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<FlowSettings>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            policy: RoutingPolicy::default(),
            max_hops: DEFAULT_MAX_HOPS,
            qos_delay_threshold_ms: DEFAULT_QOS_DELAY_THRESHOLD_MS,
            link_defaults: LinkDefaults::default(),
            flow: None,
        }
    }
}

impl ControllerConfig {
    pub fn load_balancing() -> Self {
        Self::default()
    }

    pub fn qos() -> Self {
        Self {
            policy: RoutingPolicy::Qos,
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// 从 JSON 文件加载并校验
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: ControllerConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hops == 0 {
            return Err(ConfigError::Invalid("max_hops must be at least 1".into()));
        }
        if !(self.link_defaults.capacity_mbps > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "link capacity must be positive, got {}",
                self.link_defaults.capacity_mbps
            )));
        }
        if self.qos_delay_threshold_ms.is_nan() {
            return Err(ConfigError::Invalid("qos_delay_threshold_ms is NaN".into()));
        }
        Ok(())
    }

    /// 生效的规则参数
    pub fn flow(&self) -> FlowSettings {
        self.flow
            .unwrap_or_else(|| FlowSettings::for_policy(self.policy))
    }

    pub fn selector(&self) -> PathSelector {
        PathSelector::new(self.max_hops, self.qos_delay_threshold_ms)
    }
}
