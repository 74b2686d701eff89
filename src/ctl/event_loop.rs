//! 事件循环
//!
//! 单线程、逐个处理：一个事件完整处理完之后才分发下一个。
//! 事件类别到处理函数的映射由显式的分发表给出。

use std::collections::{HashMap, VecDeque};

use tracing::{debug, info, warn};

use super::controller::ControllerCore;
use super::event::{ControllerEvent, Decision, EventKind};
use crate::flow::SwitchAgent;

/// 事件处理函数；帧事件返回控制器的决定
pub type Handler = fn(&mut ControllerCore, ControllerEvent, &mut dyn SwitchAgent) -> Option<Decision>;

/// 事件类别 -> 处理函数
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    handlers: HashMap<EventKind, Handler>,
}

impl DispatchTable {
    /// 空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册三类标准处理函数
    pub fn standard() -> Self {
        let mut t = Self::new();
        t.register(EventKind::SwitchConnected, handle_switch_connected);
        t.register(EventKind::FrameIn, handle_frame_in);
        t.register(EventKind::TopologyChanged, handle_topology_changed);
        t
    }

    /// 注册处理函数，返回被替换的旧函数
    pub fn register(&mut self, kind: EventKind, handler: Handler) -> Option<Handler> {
        self.handlers.insert(kind, handler)
    }

    pub fn handler(&self, kind: EventKind) -> Option<Handler> {
        self.handlers.get(&kind).copied()
    }
}

fn handle_switch_connected(
    core: &mut ControllerCore,
    ev: ControllerEvent,
    agent: &mut dyn SwitchAgent,
) -> Option<Decision> {
    if let ControllerEvent::SwitchConnected { switch } = ev {
        core.on_switch_connected(switch, agent);
    }
    None
}

fn handle_frame_in(
    core: &mut ControllerCore,
    ev: ControllerEvent,
    agent: &mut dyn SwitchAgent,
) -> Option<Decision> {
    match ev {
        ControllerEvent::FrameIn(frame_in) => Some(core.on_frame_in(frame_in, agent)),
        _ => None,
    }
}

fn handle_topology_changed(
    core: &mut ControllerCore,
    ev: ControllerEvent,
    _agent: &mut dyn SwitchAgent,
) -> Option<Decision> {
    if let ControllerEvent::TopologyChanged { switches, links } = ev {
        core.on_topology_changed(&switches, &links);
    }
    None
}

/// 一次分发的记录
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub seq: u64,
    pub kind: EventKind,
    /// 没有注册处理函数时为 false
    pub handled: bool,
    pub decision: Option<Decision>,
}

/// 拥有控制器核心与交换机代理的事件循环
#[derive(Debug)]
pub struct EventLoop<A: SwitchAgent> {
    core: ControllerCore,
    agent: A,
    table: DispatchTable,
    next_seq: u64,
    q: VecDeque<(u64, ControllerEvent)>,
}

impl<A: SwitchAgent> EventLoop<A> {
    pub fn new(core: ControllerCore, agent: A) -> Self {
        Self::with_table(core, agent, DispatchTable::standard())
    }

    pub fn with_table(core: ControllerCore, agent: A, table: DispatchTable) -> Self {
        Self {
            core,
            agent,
            table,
            next_seq: 0,
            q: VecDeque::new(),
        }
    }

    /// 事件入队（先进先出）
    pub fn push(&mut self, ev: ControllerEvent) -> u64 {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push_back((seq, ev));
        seq
    }

    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 处理队首事件；队列为空时返回 None
    pub fn step(&mut self) -> Option<Dispatched> {
        let (seq, ev) = self.q.pop_front()?;
        let kind = ev.kind();
        debug!(seq, ?kind, remaining_queue = self.q.len(), "分发事件");

        let Some(handler) = self.table.handler(kind) else {
            warn!(seq, ?kind, "没有注册处理函数，丢弃事件");
            return Some(Dispatched {
                seq,
                kind,
                handled: false,
                decision: None,
            });
        };
        let decision = handler(&mut self.core, ev, &mut self.agent);
        Some(Dispatched {
            seq,
            kind,
            handled: true,
            decision,
        })
    }

    /// 处理所有事件直到队列为空
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) -> Vec<Dispatched> {
        info!(queue_size = self.q.len(), "▶️  开始处理事件");
        let mut out = Vec::with_capacity(self.q.len());
        while let Some(d) = self.step() {
            out.push(d);
        }
        info!(total_events = out.len(), "✅ 事件处理完成");
        out
    }

    pub fn core(&self) -> &ControllerCore {
        &self.core
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut A {
        &mut self.agent
    }

    pub fn into_parts(self) -> (ControllerCore, A) {
        (self.core, self.agent)
    }
}
