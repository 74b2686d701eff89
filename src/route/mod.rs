//! 选路模块
//!
//! 负载均衡与 QoS 两种策略，共用简单路径枚举与最短路径回退。

mod load_balance;
mod path;
mod qos;
mod search;
mod selector;

pub use load_balance::least_loaded;
pub use path::Path;
pub use qos::{PathQos, QosRequirement, best_for};
pub use search::{shortest_path, simple_paths};
pub use selector::{
    Assessment, DEFAULT_MAX_HOPS, DEFAULT_QOS_DELAY_THRESHOLD_MS, PathOrigin, PathSelector,
    Selection, Strategy,
};
