//! 参考拓扑
//!
//! 以拓扑服务上报的形式（交换机列表 + 有向链路）构建测试床拓扑。
//! 每个交换机的 1 号端口接主机，交换机间端口从 2 开始按连线顺序分配。

mod ladder;
mod linear;
mod mesh;
mod snapshot;

pub use ladder::build_ladder8;
pub use linear::build_linear;
pub use mesh::build_mesh4;
pub use snapshot::{HOST_PORT, TopologySnapshot};
