use crate::error::Error;
use crate::flow::{
    FlowRequest, FlowRule, MatchKey, OutputAction, RecordingAgent, RuleMatch, install,
};
use crate::net::{LinkDefaults, MacAddr, PortNo, SwitchId, TopologyGraph};
use crate::route::Path;
use crate::topo::{HOST_PORT, build_linear};

fn s(id: u64) -> SwitchId {
    SwitchId(id)
}

fn linear3() -> TopologyGraph {
    let snap = build_linear(3);
    TopologyGraph::build(&snap.switches, &snap.links, &LinkDefaults::default())
}

fn request(ids: &[u64]) -> FlowRequest {
    FlowRequest {
        path: Path::new(ids.iter().copied().map(SwitchId).collect()),
        key: MatchKey {
            src: MacAddr::from_u64(0xa),
            dst: MacAddr::from_u64(0xb),
            in_port: HOST_PORT,
        },
        egress_port: HOST_PORT,
        priority: 1,
        idle_timeout: 10,
        hard_timeout: 30,
    }
}

fn rule(switch: u64, rule_match: RuleMatch, port: u32) -> FlowRule {
    FlowRule {
        switch: s(switch),
        rule_match,
        action: OutputAction::Port(PortNo(port)),
        priority: 1,
        idle_timeout: 10,
        hard_timeout: 30,
    }
}

#[test]
fn installs_one_rule_per_hop() {
    let mut g = linear3();
    let mut agent = RecordingAgent::default();
    let req = request(&[1, 2, 3]);

    let out = install(&mut g, &mut agent, &req).unwrap();
    assert_eq!(out.rules, 3);
    assert_eq!(out.first_hop_port, PortNo(2));

    let dst = req.key.dst;
    let rules: Vec<_> = agent.rules().cloned().collect();
    assert_eq!(
        rules,
        vec![
            rule(1, RuleMatch::in_port_dst(HOST_PORT, dst), 2),
            rule(2, RuleMatch::dst(dst), 3),
            rule(3, RuleMatch::dst(dst), 1),
        ]
    );
    assert_eq!(agent.packet_outs().count(), 0);
}

#[test]
fn increments_load_on_traversed_links_only() {
    let mut g = linear3();
    let mut agent = RecordingAgent::default();
    install(&mut g, &mut agent, &request(&[1, 2, 3])).unwrap();
    install(&mut g, &mut agent, &request(&[1, 2])).unwrap();

    assert_eq!(g.link(s(1), s(2)).unwrap().load(), 2);
    assert_eq!(g.link(s(2), s(3)).unwrap().load(), 1);
    assert_eq!(g.link(s(2), s(1)).unwrap().load(), 0);
    assert_eq!(g.link(s(3), s(2)).unwrap().load(), 0);
    assert!(g.link(s(1), s(2)).unwrap().weight() > 1.0);
}

#[test]
fn short_path_is_rejected_without_side_effects() {
    let mut g = linear3();
    let before = g.clone();
    let mut agent = RecordingAgent::default();

    let err = install(&mut g, &mut agent, &request(&[2])).unwrap_err();
    assert_eq!(err, Error::PathTooShort { len: 1 });
    assert!(agent.messages.is_empty());
    assert_eq!(g, before);
}

#[test]
fn missing_link_aborts_before_any_rule() {
    let mut g = linear3();
    let before = g.clone();
    let mut agent = RecordingAgent::default();

    let err = install(&mut g, &mut agent, &request(&[1, 2, 4])).unwrap_err();
    assert_eq!(err, Error::NoSuchLink { src: s(2), dst: s(4) });
    assert!(agent.messages.is_empty());
    assert_eq!(g, before);
}
