use crate::net::{HostLocation, HostLocationTable, MacAddr, PortNo, SwitchId};

#[test]
fn learn_then_lookup() {
    let mut t = HostLocationTable::new();
    let a = MacAddr::from_u64(1);
    assert!(t.lookup(&a).is_none());

    assert_eq!(t.learn(a, SwitchId(1), PortNo(1)), None);
    assert_eq!(
        t.lookup(&a),
        Some(HostLocation {
            switch: SwitchId(1),
            port: PortNo(1)
        })
    );
    assert_eq!(t.len(), 1);
}

#[test]
fn host_silently_migrates_to_latest_location() {
    let mut t = HostLocationTable::new();
    let a = MacAddr::from_u64(1);
    t.learn(a, SwitchId(1), PortNo(1));

    // Same location again is not a migration.
    assert_eq!(t.learn(a, SwitchId(1), PortNo(1)), None);

    let old = t.learn(a, SwitchId(4), PortNo(3));
    assert_eq!(
        old,
        Some(HostLocation {
            switch: SwitchId(1),
            port: PortNo(1)
        })
    );
    assert_eq!(t.lookup(&a).map(|l| l.switch), Some(SwitchId(4)));
    assert_eq!(t.len(), 1);
}
