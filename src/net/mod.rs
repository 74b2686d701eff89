//! 网络模型模块
//!
//! 此模块包含控制器所维护的共享状态：拓扑图、链路指标、主机位置表与统计信息。

// 子模块声明
mod frame;
mod host_table;
mod id;
mod link;
mod stats;
mod topology;

// 重新导出公共接口
pub use frame::{
    ETH_TYPE_ARP, ETH_TYPE_IPV4, ETH_TYPE_LLDP, Frame, IP_PROTO_TCP, IP_PROTO_UDP,
};
pub use host_table::{HostLocation, HostLocationTable};
pub use id::{MacAddr, ParseMacError, PortNo, SwitchId};
pub use link::{Link, LinkDefaults, LinkMetrics, congestion_weight};
pub use stats::{Stats, StatsReport};
pub use topology::{LinkSpec, TopologyGraph};
