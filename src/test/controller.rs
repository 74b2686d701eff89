use crate::ctl::{ControllerConfig, ControllerCore, Decision, FloodReason, FrameIn};
use crate::error::Error;
use crate::flow::{FramePayload, OutputAction, RecordingAgent, RuleMatch};
use crate::net::{
    ETH_TYPE_ARP, ETH_TYPE_LLDP, Frame, IP_PROTO_TCP, LinkSpec, MacAddr, PortNo, SwitchId,
};
use crate::route::Path;
use crate::topo::{HOST_PORT, TopologySnapshot, build_linear, build_mesh4};

fn s(id: u64) -> SwitchId {
    SwitchId(id)
}

fn h(id: u64) -> MacAddr {
    MacAddr::from_u64(id)
}

fn path(ids: &[u64]) -> Path {
    Path::new(ids.iter().copied().map(SwitchId).collect())
}

fn frame_in(switch: u64, port: u32, frame: Frame) -> FrameIn {
    FrameIn {
        switch: s(switch),
        in_port: PortNo(port),
        frame,
        buffer_id: None,
    }
}

fn icmp(src: u64, dst: u64) -> Frame {
    Frame {
        data: vec![0xde, 0xad],
        ..Frame::ipv4(h(src), h(dst), 1)
    }
}

fn core_on(config: ControllerConfig, snap: &TopologySnapshot) -> ControllerCore {
    let mut core = ControllerCore::new(config);
    core.on_topology_changed(&snap.switches, &snap.links);
    core
}

/// Diamond with host ports free: s1 -> {s2, s3} -> s4
fn diamond() -> TopologySnapshot {
    let mut t = TopologySnapshot::new();
    let sw: Vec<_> = (1..=4).map(|i| t.add_switch(i)).collect();
    t.connect(sw[0], sw[1]);
    t.connect(sw[0], sw[2]);
    t.connect(sw[1], sw[3]);
    t.connect(sw[2], sw[3]);
    t
}

#[test]
fn unknown_destination_floods_and_learns_source() {
    let mut core = core_on(ControllerConfig::load_balancing(), &build_linear(3));
    let mut agent = RecordingAgent::default();

    let d = core.on_frame_in(frame_in(1, 1, icmp(1, 3)), &mut agent);
    assert_eq!(d, Decision::Flood(FloodReason::UnknownDestination));
    assert!(d.is_flood());

    let loc = core.hosts().lookup(&h(1)).unwrap();
    assert_eq!((loc.switch, loc.port), (s(1), HOST_PORT));

    assert_eq!(agent.rules().count(), 0);
    let outs: Vec<_> = agent.packet_outs().collect();
    assert_eq!(outs.len(), 1);
    assert_eq!(outs[0].action, OutputAction::Flood);
    assert_eq!(outs[0].payload, FramePayload::Data(vec![0xde, 0xad]));

    let c = core.counters();
    assert_eq!(c.frames_processed, 1);
    assert_eq!(c.path_computations, 0);
    assert_eq!(c.rules_installed, 0);
}

#[test]
fn known_destination_installs_path_and_forwards() {
    let mut core = core_on(ControllerConfig::load_balancing(), &build_linear(3));
    let mut agent = RecordingAgent::default();

    core.on_frame_in(frame_in(3, 1, icmp(3, 1)), &mut agent);
    agent.clear();

    let d = core.on_frame_in(frame_in(1, 1, icmp(1, 3)), &mut agent);
    assert_eq!(
        d,
        Decision::Forward {
            port: PortNo(2),
            path: path(&[1, 2, 3]),
        }
    );

    let rules: Vec<_> = agent.rules().collect();
    assert_eq!(rules.len(), 3);
    for r in &rules {
        assert_eq!(r.priority, 1);
        assert_eq!((r.idle_timeout, r.hard_timeout), (10, 30));
    }
    assert_eq!(rules[0].rule_match, RuleMatch::in_port_dst(HOST_PORT, h(3)));
    assert_eq!(rules[2].action, OutputAction::Port(HOST_PORT));

    let outs: Vec<_> = agent.packet_outs().collect();
    assert_eq!(outs.len(), 1);
    assert_eq!(outs[0].action, OutputAction::Port(PortNo(2)));

    assert_eq!(core.graph().link(s(1), s(2)).unwrap().load(), 1);
    assert_eq!(core.graph().link(s(2), s(3)).unwrap().load(), 1);
    assert_eq!(core.graph().link(s(3), s(2)).unwrap().load(), 0);

    let c = core.counters();
    assert_eq!(c.frames_processed, 2);
    assert_eq!(c.path_computations, 1);
    assert_eq!(c.rules_installed, 3);
    assert_eq!(c.load_balanced_paths, 0);
}

#[test]
fn second_flow_takes_the_less_loaded_branch() {
    let mut core = core_on(ControllerConfig::load_balancing(), &diamond());
    let mut agent = RecordingAgent::default();

    core.on_frame_in(frame_in(4, 1, icmp(4, 1)), &mut agent);
    let first = core.on_frame_in(frame_in(1, 1, icmp(1, 4)), &mut agent);
    let second = core.on_frame_in(frame_in(1, 1, icmp(1, 4)), &mut agent);

    match (first, second) {
        (Decision::Forward { path: p1, .. }, Decision::Forward { path: p2, .. }) => {
            assert_eq!(p1, path(&[1, 2, 4]));
            assert_eq!(p2, path(&[1, 3, 4]));
        }
        other => panic!("expected two forwards, got {other:?}"),
    }
    assert_eq!(core.counters().load_balanced_paths, 1);
    assert_eq!(core.counters().path_computations, 2);
}

#[test]
fn stale_binding_degrades_to_flood() {
    let mut core = core_on(ControllerConfig::load_balancing(), &build_linear(3));
    let mut agent = RecordingAgent::default();
    core.on_frame_in(frame_in(3, 1, icmp(3, 1)), &mut agent);

    let smaller = build_linear(2);
    core.on_topology_changed(&smaller.switches, &smaller.links);
    agent.clear();

    let d = core.on_frame_in(frame_in(1, 1, icmp(1, 3)), &mut agent);
    assert_eq!(
        d,
        Decision::Flood(FloodReason::Degraded(Error::StaleBinding {
            host: h(3),
            switch: s(3),
        }))
    );
    assert_eq!(agent.rules().count(), 0);
    assert_eq!(agent.packet_outs().next().unwrap().action, OutputAction::Flood);
}

#[test]
fn frame_from_unknown_switch_degrades_to_flood() {
    let mut core = core_on(ControllerConfig::load_balancing(), &build_linear(2));
    let mut agent = RecordingAgent::default();
    core.on_frame_in(frame_in(2, 1, icmp(2, 1)), &mut agent);

    let d = core.on_frame_in(frame_in(9, 1, icmp(1, 2)), &mut agent);
    assert_eq!(
        d,
        Decision::Flood(FloodReason::Degraded(Error::UnknownSwitch { switch: s(9) }))
    );
    assert_eq!(core.counters().path_computations, 0);
}

#[test]
fn disconnected_destination_degrades_to_flood() {
    let mut t = TopologySnapshot::new();
    let a = t.add_switch(1);
    let b = t.add_switch(2);
    t.add_switch(3);
    t.connect(a, b);
    let mut core = core_on(ControllerConfig::load_balancing(), &t);
    let mut agent = RecordingAgent::default();

    core.on_frame_in(frame_in(3, 1, icmp(3, 1)), &mut agent);
    let d = core.on_frame_in(frame_in(1, 1, icmp(1, 3)), &mut agent);
    assert_eq!(
        d,
        Decision::Flood(FloodReason::Degraded(Error::NoPathFound {
            src: s(1),
            dst: s(3),
        }))
    );
    assert_eq!(core.counters().path_computations, 1);
    assert_eq!(core.counters().rules_installed, 0);
}

#[test]
fn topology_change_resets_load() {
    let snap = build_linear(3);
    let mut core = core_on(ControllerConfig::load_balancing(), &snap);
    let mut agent = RecordingAgent::default();
    core.on_frame_in(frame_in(3, 1, icmp(3, 1)), &mut agent);
    core.on_frame_in(frame_in(1, 1, icmp(1, 3)), &mut agent);
    assert!(core.graph().average_link_load() > 0.0);

    core.on_topology_changed(&snap.switches, &snap.links);
    assert!(core.graph().links().all(|l| l.load() == 0));
    assert_eq!(core.stats().average_link_load, 0.0);
    // host bindings survive a reset
    assert_eq!(core.hosts().len(), 2);
}

#[test]
fn topology_control_frames_are_ignored() {
    let mut core = core_on(ControllerConfig::load_balancing(), &build_linear(2));
    let mut agent = RecordingAgent::default();

    let lldp = Frame::new(h(1), h(2), ETH_TYPE_LLDP);
    let d = core.on_frame_in(frame_in(1, 2, lldp), &mut agent);
    assert_eq!(d, Decision::Ignored);
    assert_eq!(d.action(), None);
    assert!(agent.messages.is_empty());
    assert!(core.hosts().is_empty());
    assert_eq!(core.counters().frames_processed, 0);
}

#[test]
fn same_switch_hosts_forward_without_rules() {
    let mut core = core_on(ControllerConfig::load_balancing(), &build_linear(2));
    let mut agent = RecordingAgent::default();

    core.on_frame_in(frame_in(1, 5, icmp(2, 1)), &mut agent);
    agent.clear();
    let d = core.on_frame_in(frame_in(1, 1, icmp(1, 2)), &mut agent);
    assert_eq!(
        d,
        Decision::Forward {
            port: PortNo(5),
            path: path(&[1]),
        }
    );
    assert_eq!(agent.rules().count(), 0);
    assert_eq!(
        agent.packet_outs().next().unwrap().action,
        OutputAction::Port(PortNo(5))
    );
    assert_eq!(core.counters().path_computations, 1);
    assert_eq!(core.counters().rules_installed, 0);
}

#[test]
fn buffered_frames_are_released_by_buffer_id() {
    let mut core = core_on(ControllerConfig::load_balancing(), &build_linear(2));
    let mut agent = RecordingAgent::default();

    let mut ev = frame_in(1, 1, icmp(1, 2));
    ev.buffer_id = Some(7);
    core.on_frame_in(ev, &mut agent);
    let out = agent.packet_outs().next().unwrap();
    assert_eq!(out.payload, FramePayload::Buffer(7));
    assert_eq!((out.switch, out.in_port), (s(1), HOST_PORT));
}

#[test]
fn switch_connect_installs_table_miss_rule() {
    let mut core = ControllerCore::new(ControllerConfig::default());
    let mut agent = RecordingAgent::default();

    core.on_switch_connected(s(1), &mut agent);
    core.on_switch_connected(s(1), &mut agent);
    core.on_switch_connected(s(2), &mut agent);

    let rules: Vec<_> = agent.rules().collect();
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0].priority, 0);
    assert_eq!(rules[0].rule_match, RuleMatch::any());
    assert_eq!(rules[0].action, OutputAction::Controller);
    assert_eq!((rules[0].idle_timeout, rules[0].hard_timeout), (0, 0));

    let c = core.counters();
    assert_eq!(c.switches_connected, 2);
    assert_eq!(c.rules_installed, 3);
    assert_eq!(core.connected_switches().collect::<Vec<_>>(), vec![s(1), s(2)]);
}

#[test]
fn qos_variant_uses_high_priority_for_tcp_and_udp() {
    let mut core = core_on(ControllerConfig::qos(), &build_mesh4());
    let mut agent = RecordingAgent::default();
    core.on_frame_in(frame_in(4, 1, Frame::new(h(4), h(1), ETH_TYPE_ARP)), &mut agent);
    assert_eq!(core.counters().high_priority_flows, 0);
    agent.clear();

    let d = core.on_frame_in(
        frame_in(1, 1, Frame::ipv4(h(1), h(4), IP_PROTO_TCP)),
        &mut agent,
    );
    match d {
        Decision::Forward { path: p, .. } => assert_eq!(p, path(&[1, 2, 4])),
        other => panic!("expected forward, got {other:?}"),
    }
    let rules: Vec<_> = agent.rules().collect();
    assert_eq!(rules.len(), 3);
    assert!(rules.iter().all(|r| r.priority == 2));
    assert!(rules.iter().all(|r| (r.idle_timeout, r.hard_timeout) == (15, 45)));
    assert_eq!(core.counters().high_priority_flows, 1);
    agent.clear();

    core.on_frame_in(frame_in(1, 1, Frame::new(h(1), h(4), ETH_TYPE_ARP)), &mut agent);
    assert!(agent.rules().all(|r| r.priority == 1));
    assert_eq!(core.counters().high_priority_flows, 1);
    assert_eq!(core.counters().qos_violations, 0);
}

#[test]
fn qos_violations_are_counted_but_still_installed() {
    let config = ControllerConfig {
        qos_delay_threshold_ms: 10.0,
        ..ControllerConfig::qos()
    };
    let mut core = core_on(config, &build_mesh4());
    let mut agent = RecordingAgent::default();
    core.on_frame_in(frame_in(4, 1, icmp(4, 1)), &mut agent);
    agent.clear();

    let d = core.on_frame_in(frame_in(1, 1, icmp(1, 4)), &mut agent);
    assert!(matches!(d, Decision::Forward { .. }));
    assert_eq!(core.counters().qos_violations, 1);
    assert!(agent.rules().count() > 0);
}

#[test]
fn link_metrics_from_topology_event_override_defaults() {
    let links = vec![
        LinkSpec::new(s(1), PortNo(2), s(2)).with_metrics(3.0, 70.0, 0.5),
        LinkSpec::new(s(2), PortNo(2), s(1)),
    ];
    let mut core = ControllerCore::new(ControllerConfig::default());
    core.on_topology_changed(&[], &links);

    let fwd = core.graph().link(s(1), s(2)).unwrap();
    assert_eq!(fwd.metrics.delay_ms, 3.0);
    assert_eq!(fwd.metrics.bandwidth_mbps, 70.0);
    let back = core.graph().link(s(2), s(1)).unwrap();
    assert_eq!(back.metrics.delay_ms, core.config().link_defaults.delay_ms);
}
