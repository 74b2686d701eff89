use crate::error::Error;
use crate::net::{LinkDefaults, LinkSpec, PortNo, SwitchId, TopologyGraph, congestion_weight};

fn s(id: u64) -> SwitchId {
    SwitchId(id)
}

fn two_switch_links() -> Vec<LinkSpec> {
    vec![
        LinkSpec::new(s(1), PortNo(2), s(2)),
        LinkSpec::new(s(2), PortNo(2), s(1)),
    ]
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn reset_topology_is_idempotent_and_clears_load() {
    let defaults = LinkDefaults::default();
    let switches = [s(1), s(2)];
    let links = two_switch_links();

    let mut g = TopologyGraph::default();
    g.reset_topology(&switches, &links, &defaults);
    let first = g.clone();

    assert!(g.record_load_increase(s(1), s(2), 3));
    assert_eq!(g.link(s(1), s(2)).unwrap().load(), 3);

    g.reset_topology(&switches, &links, &defaults);
    assert_eq!(g, first);
    assert_eq!(g.link_count(), 2);
    assert_eq!(g.link(s(1), s(2)).unwrap().load(), 0);
    assert!(approx(g.link(s(1), s(2)).unwrap().weight(), 1.0));
}

#[test]
fn duplicate_links_collapse_to_last_report() {
    let links = vec![
        LinkSpec::new(s(1), PortNo(2), s(2)),
        LinkSpec::new(s(1), PortNo(7), s(2)),
    ];
    let g = TopologyGraph::build(&[s(1), s(2)], &links, &LinkDefaults::default());
    assert_eq!(g.link_count(), 1);
    assert_eq!(g.neighbor_port(s(1), s(2)), Ok(PortNo(7)));
}

#[test]
fn link_endpoints_join_the_switch_set() {
    let links = vec![LinkSpec::new(s(3), PortNo(2), s(4))];
    let g = TopologyGraph::build(&[s(1)], &links, &LinkDefaults::default());
    assert!(g.contains_switch(s(1)));
    assert!(g.contains_switch(s(3)));
    assert!(g.contains_switch(s(4)));
    assert_eq!(g.switch_count(), 3);
}

#[test]
fn neighbors_are_sorted_by_switch_id() {
    let links = vec![
        LinkSpec::new(s(1), PortNo(2), s(9)),
        LinkSpec::new(s(1), PortNo(3), s(4)),
        LinkSpec::new(s(1), PortNo(4), s(6)),
        LinkSpec::new(s(4), PortNo(2), s(1)),
    ];
    let g = TopologyGraph::build(&[], &links, &LinkDefaults::default());
    assert_eq!(g.neighbors(s(1)).collect::<Vec<_>>(), vec![s(4), s(6), s(9)]);
    assert_eq!(g.neighbors(s(4)).collect::<Vec<_>>(), vec![s(1)]);
    assert_eq!(g.neighbors(s(9)).count(), 0);
}

#[test]
fn load_increase_recomputes_weight_and_clamps_utilization() {
    let links = vec![
        LinkSpec::new(s(1), PortNo(2), s(2)),
        LinkSpec::new(s(2), PortNo(2), s(1)).with_capacity(2.0),
    ];
    let mut g = TopologyGraph::build(&[], &links, &LinkDefaults::default());

    g.record_load_increase(s(1), s(2), 1);
    assert_eq!(g.link(s(1), s(2)).unwrap().load(), 1);
    assert!(approx(g.link(s(1), s(2)).unwrap().weight(), 1.1));

    g.record_load_increase(s(2), s(1), 5);
    assert_eq!(g.link(s(2), s(1)).unwrap().load(), 5);
    assert!(approx(g.link(s(2), s(1)).unwrap().weight(), 11.0));
}

#[test]
fn load_increase_on_missing_link_is_a_noop() {
    let mut g = TopologyGraph::build(&[], &two_switch_links(), &LinkDefaults::default());
    let before = g.clone();
    assert!(!g.record_load_increase(s(1), s(3), 1));
    assert_eq!(g, before);
}

#[test]
fn neighbor_port_reports_missing_links() {
    let g = TopologyGraph::build(&[], &two_switch_links(), &LinkDefaults::default());
    assert_eq!(g.neighbor_port(s(2), s(1)), Ok(PortNo(2)));
    assert_eq!(
        g.neighbor_port(s(1), s(3)),
        Err(Error::NoSuchLink {
            src: s(1),
            dst: s(3)
        })
    );
}

#[test]
fn missing_metrics_take_configured_defaults() {
    let defaults = LinkDefaults {
        capacity_mbps: 40.0,
        delay_ms: 3.0,
        bandwidth_mbps: 70.0,
        loss_pct: 0.5,
    };
    let links = vec![
        LinkSpec::new(s(1), PortNo(2), s(2)),
        LinkSpec::new(s(2), PortNo(2), s(1)).with_metrics(8.0, 20.0, 1.0),
    ];
    let g = TopologyGraph::build(&[], &links, &defaults);

    let plain = g.link(s(1), s(2)).unwrap();
    assert!(approx(plain.capacity_mbps, 40.0));
    assert!(approx(plain.metrics.delay_ms, 3.0));
    assert!(approx(plain.metrics.bandwidth_mbps, 70.0));
    assert!(approx(plain.metrics.loss_pct, 0.5));

    let tuned = g.link(s(2), s(1)).unwrap();
    assert!(approx(tuned.capacity_mbps, 40.0));
    assert!(approx(tuned.metrics.delay_ms, 8.0));
    assert!(approx(tuned.metrics.bandwidth_mbps, 20.0));
    assert!(approx(tuned.metrics.loss_pct, 1.0));
}

#[test]
fn average_link_load_over_all_links() {
    let mut g = TopologyGraph::build(&[], &two_switch_links(), &LinkDefaults::default());
    assert!(approx(g.average_link_load(), 0.0));
    g.record_load_increase(s(1), s(2), 3);
    assert!(approx(g.average_link_load(), 1.5));
    assert!(approx(TopologyGraph::default().average_link_load(), 0.0));
}

#[test]
fn congestion_weight_is_linear_until_capacity() {
    assert!(approx(congestion_weight(0, 100.0), 1.0));
    assert!(approx(congestion_weight(50, 100.0), 6.0));
    assert!(approx(congestion_weight(100, 100.0), 11.0));
    assert!(approx(congestion_weight(1_000, 100.0), 11.0));
}
