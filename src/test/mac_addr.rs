use crate::net::MacAddr;

#[test]
fn mac_addr_parses_and_formats_colon_hex() {
    let mac: MacAddr = "00:00:00:00:00:0a".parse().unwrap();
    assert_eq!(mac, MacAddr::from_u64(10));
    assert_eq!(mac.to_string(), "00:00:00:00:00:0a");
    assert_eq!(MacAddr::BROADCAST.to_string(), "ff:ff:ff:ff:ff:ff");
}

#[test]
fn mac_addr_rejects_malformed_input() {
    for bad in ["", "00:00:00:00:00", "00:00:00:00:00:00:00", "0:00:00:00:00:00", "zz:00:00:00:00:00"] {
        assert!(bad.parse::<MacAddr>().is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn mac_addr_serializes_as_string() {
    let mac = MacAddr::from_u64(0x0102_0304_0506);
    let json = serde_json::to_string(&mac).unwrap();
    assert_eq!(json, "\"01:02:03:04:05:06\"");
    let back: MacAddr = serde_json::from_str(&json).unwrap();
    assert_eq!(back, mac);
    assert!(serde_json::from_str::<MacAddr>("\"nope\"").is_err());
}
