//! 错误类型
//!
//! 路由与下发过程中的错误都不会越过控制器边界：`ControllerCore` 会把它们降级为 Flood。

use std::path::PathBuf;

use thiserror::Error;

use crate::net::{MacAddr, SwitchId};

/// 路由、拓扑查询与流表下发相关的错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// 在跳数上限内找不到简单路径，且最短跳数路径也不存在
    #[error("no path from switch {src} to switch {dst}")]
    NoPathFound { src: SwitchId, dst: SwitchId },
    /// 链路在计算之后被拓扑重置删除
    #[error("no link from switch {src} to switch {dst}")]
    NoSuchLink { src: SwitchId, dst: SwitchId },
    /// 主机位置指向一个已不在拓扑中的交换机
    #[error("host {host} is bound to switch {switch}, which is not in the topology")]
    StaleBinding { host: MacAddr, switch: SwitchId },
    /// 帧的入口交换机不在当前拓扑中
    #[error("switch {switch} is not in the topology")]
    UnknownSwitch { switch: SwitchId },
    /// 路径至少需要两个交换机才能下发
    #[error("path of length {len} is too short to install")]
    PathTooShort { len: usize },
}

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
