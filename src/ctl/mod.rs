//! 控制器模块
//!
//! 事件驱动的编排层：事件类型、配置、控制器核心与拥有它的事件循环。

mod config;
mod controller;
mod event;
mod event_loop;

pub use config::{ControllerConfig, FlowSettings, RoutingPolicy};
pub use controller::ControllerCore;
pub use event::{ControllerEvent, Decision, EventKind, FloodReason, FrameIn};
pub use event_loop::{DispatchTable, Dispatched, EventLoop, Handler};
