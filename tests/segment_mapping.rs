//! Integration tests for per-segment group address mapping.
//!
//! Scenarios mirror the manual bus test plans: derivation with the default
//! 1/0/10 stride, KNX boundary handling, and conflict detection before
//! segment communication objects are registered.

use knx_segments::segment::MAX_SEGMENTS;
use knx_segments::{
    all_used_addresses, has_conflicts, is_in_use, parse_address, segment_address,
    try_segment_address, AddressKind, CentralAddressSet, GroupAddress, GroupAddressFields,
    SegmentConfig, SegmentOffset, SegmentTable,
};

fn offset(main: u8, middle: u8, sub: u8) -> SegmentOffset {
    SegmentOffset::new(main, middle, sub).expect("valid offset")
}

fn central(entries: &[(AddressKind, &str)]) -> CentralAddressSet {
    let mut set = CentralAddressSet::new();
    for &(kind, text) in entries {
        set.set(kind, text).expect("address text fits");
    }
    set
}

fn full_central() -> CentralAddressSet {
    central(&[
        (AddressKind::InPower, "1/2/10"),
        (AddressKind::InBrightness, "1/2/20"),
        (AddressKind::InEffect, "1/2/30"),
        (AddressKind::OutPower, "2/2/10"),
        (AddressKind::OutBrightness, "2/2/20"),
        (AddressKind::OutEffect, "2/2/30"),
    ])
}

const SAMPLE_ADDRESSES: &[&str] = &[
    "0/0/1", "1/2/50", "1/2/10", "5/3/100", "30/7/250", "31/7/255", "15/0/0",
];

#[test]
fn test_default_stride_scenario() {
    let off = offset(1, 0, 10);
    assert_eq!(segment_address("1/2/50", 0, off), GroupAddress::encode(1, 2, 50));
    assert_eq!(segment_address("1/2/50", 1, off), GroupAddress::encode(2, 2, 60));
    assert_eq!(segment_address("1/2/50", 2, off), GroupAddress::encode(3, 2, 70));
    assert_eq!(segment_address("30/7/250", 2, off), GroupAddress::UNSET);
    assert_eq!(segment_address("", 1, off), GroupAddress::UNSET);
    assert_eq!(segment_address("invalid", 1, off), GroupAddress::UNSET);
}

#[test]
fn test_identity_for_any_offset() {
    for text in SAMPLE_ADDRESSES {
        for off in [SegmentOffset::ZERO, offset(1, 0, 10), offset(31, 7, 255)] {
            assert_eq!(segment_address(text, 0, off), parse_address(text), "{text}");
        }
    }
}

#[test]
fn test_linearity_within_range() {
    let off = offset(2, 1, 7);
    for text in SAMPLE_ADDRESSES {
        let base = GroupAddressFields::parse(text).expect("sample parses");
        for k in 0..=MAX_SEGMENTS {
            let Ok(addr) = try_segment_address(text, k, off) else {
                continue;
            };
            let k = u32::from(k);
            assert_eq!(u32::from(addr.main()), base.main + 2 * k);
            assert_eq!(u32::from(addr.middle()), base.middle + k);
            assert_eq!(u32::from(addr.sub()), base.sub + 7 * k);
        }
    }
}

#[test]
fn test_sentinel_is_monotonic() {
    for off in [offset(1, 0, 10), offset(0, 1, 0), offset(3, 0, 0)] {
        for text in SAMPLE_ADDRESSES {
            let mut overflowed = false;
            for k in 0..=u8::MAX {
                let addr = segment_address(text, k, off);
                if overflowed {
                    assert!(addr.is_unset(), "{text} came back at segment {k}");
                }
                overflowed |= addr.is_unset();
            }
        }
    }
}

#[test]
fn test_parse_totality() {
    let inputs = [
        "", " ", "/", "//", "///", "1", "1/2", "1/2/", "/2/3", "1/2/3/4", "a/b/c", "1/x/3",
        "-1/2/3", "1.2.3", "1/2/3.0", "99999999999/1/1", "１/2/3", "1 /2/3",
    ];
    for text in inputs {
        assert!(parse_address(text).is_unset(), "{text:?} should be unset");
    }
    // syntactically valid, rejected only by the range check
    assert!(parse_address("99/9/999").is_unset());
    assert!(GroupAddressFields::parse("99/9/999").is_ok());
}

#[test]
fn test_zero_offsets_always_conflict_with_two_segments() {
    let set = central(&[(AddressKind::InPower, "1/2/50")]);
    for count in 2..=MAX_SEGMENTS {
        assert!(has_conflicts(count, SegmentOffset::ZERO, &set));
    }
    assert!(!has_conflicts(1, SegmentOffset::ZERO, &set));
}

#[test]
fn test_cross_kind_collision_is_detected() {
    // segment 1 power in = 2/2/10 = central brightness in
    let set = central(&[
        (AddressKind::InPower, "1/2/10"),
        (AddressKind::InBrightness, "2/2/10"),
    ]);
    assert!(has_conflicts(2, offset(1, 0, 0), &set));
}

#[test]
fn test_valid_configuration_has_no_conflicts() {
    let set = central(&[
        (AddressKind::InPower, "1/2/10"),
        (AddressKind::InBrightness, "1/2/20"),
    ]);
    assert!(!has_conflicts(3, offset(1, 0, 100), &set));
}

#[test]
fn test_boundary_configuration_reports_no_conflicts() {
    let set = central(&[(AddressKind::InPower, "30/7/250")]);
    let off = offset(2, 1, 10);
    assert!(segment_address("30/7/250", 1, off).is_unset());
    assert!(!has_conflicts(3, off, &set));
    assert_eq!(all_used_addresses(off, &set, 3).len(), 1);
}

#[test]
fn test_conflict_result_ignores_scan_order() {
    // the same address set, reached through different kinds
    let forward = central(&[
        (AddressKind::InPower, "1/1/10"),
        (AddressKind::OutEffect, "2/1/10"),
    ]);
    let reverse = central(&[
        (AddressKind::InPower, "2/1/10"),
        (AddressKind::OutEffect, "1/1/10"),
    ]);
    let off = offset(1, 0, 0);
    assert!(has_conflicts(2, off, &forward));
    assert!(has_conflicts(2, off, &reverse));
}

#[test]
fn test_in_use_matches_used_set() {
    let set = full_central();
    let off = offset(1, 0, 10);
    let used = all_used_addresses(off, &set, 4);
    for raw in 0..=u16::MAX {
        let addr = GroupAddress::from(raw);
        assert_eq!(is_in_use(addr, off, &set, 4), used.contains(&addr), "{addr}");
    }
}

#[test]
fn test_registration_cycle() {
    let text = "
        KNX_SEGMENT_OFFSET_MAIN=10
        KNX_SEGMENT_OFFSET_MIDDLE=0
        KNX_SEGMENT_OFFSET_SUB=50
        KNX_GA_IN_POWER=1/2/10
        KNX_GA_IN_BRI=1/2/20
        KNX_GA_IN_FX=1/2/30
        KNX_GA_OUT_POWER=2/2/10
        KNX_GA_OUT_BRI=2/2/20
        KNX_GA_OUT_FX=2/2/30
    ";
    let mut config = SegmentConfig::from_config_text(text).expect("config parses");
    assert_eq!(config.central, full_central());

    let mut table = SegmentTable::new();
    table.rebuild(&config, 3).expect("no conflicts");
    assert_eq!(table.len(), 3);
    assert_eq!(
        table.find(GroupAddress::encode(11, 2, 60)),
        Some((1, AddressKind::InPower))
    );

    // configuration saved with colliding offsets: nothing stays registered
    config.offset = offset(1, 0, 0);
    assert!(table.rebuild(&config, 3).unwrap_err().is_conflict());
    assert!(table.is_empty());
}
