use std::time::Duration;

use tabulet::{CellVersion, GcRule, RuleConfig, Timestamp};

fn cell(rank: u32, ts_millis: u64) -> CellVersion {
    CellVersion::new(rank, Timestamp::from_millis(ts_millis))
}

#[test]
fn test_max_versions_rank_boundary() {
    let now = Timestamp::from_millis(1_000);

    for n in [1u32, 2, 7, 100] {
        let rule = GcRule::max_versions(n).unwrap();
        for rank in 1..=n {
            assert!(!rule.is_garbage(&cell(rank, 0), now), "rank {rank} within {n}");
        }
        assert!(rule.is_garbage(&cell(n + 1, 0), now));
        assert!(rule.is_garbage(&cell(n + 100, 0), now));
    }
}

#[test]
fn test_max_age_exact_boundary_retained() {
    let rule = GcRule::max_age(Duration::from_millis(5)).unwrap();
    let now = Timestamp::from_millis(100);

    // Elapsed exactly equal to the bound is retained; strictly more is
    // garbage.
    assert!(!rule.is_garbage(&cell(1, 95), now));
    assert!(rule.is_garbage(&CellVersion::new(1, Timestamp::from_micros(94_999)), now));
    assert!(!rule.is_garbage(&cell(1, 96), now));
    assert!(rule.is_garbage(&cell(1, 94), now));
}

#[test]
fn test_construction_rejections() {
    assert!(GcRule::max_versions(0).unwrap_err().is_invalid_rule());
    assert!(
        GcRule::max_age(Duration::from_micros(500))
            .unwrap_err()
            .is_invalid_rule()
    );
    assert!(GcRule::max_age(Duration::ZERO).unwrap_err().is_invalid_rule());
    assert!(GcRule::union(vec![]).unwrap_err().is_invalid_rule());
    assert!(GcRule::intersection(vec![]).unwrap_err().is_invalid_rule());

    // Exactly 1ms is the smallest legal age.
    assert!(GcRule::max_age(Duration::from_millis(1)).is_ok());
}

#[test]
fn test_intersection_requires_all_children() {
    let rule = GcRule::intersection(vec![
        GcRule::max_versions(2).unwrap(),
        GcRule::max_age(Duration::from_millis(5)).unwrap(),
    ])
    .unwrap();
    let now = Timestamp::from_millis(100);

    // 10ms old but rank 1: fails only the age bound, so it stays live.
    assert!(!rule.is_garbage(&cell(1, 90), now));

    // 10ms old AND rank 3: garbage under both children.
    assert!(rule.is_garbage(&cell(3, 90), now));
}

#[test]
fn test_union_requires_any_child() {
    let rule = GcRule::union(vec![
        GcRule::max_versions(2).unwrap(),
        GcRule::max_age(Duration::from_millis(5)).unwrap(),
    ])
    .unwrap();
    let now = Timestamp::from_millis(100);

    // 10ms old at rank 1: the age child alone makes it garbage.
    assert!(rule.is_garbage(&cell(1, 90), now));

    // Recent at rank 3: the version child alone makes it garbage.
    assert!(rule.is_garbage(&cell(3, 99), now));

    // Recent at rank 1: live.
    assert!(!rule.is_garbage(&cell(1, 99), now));
}

#[test]
fn test_nested_combinators() {
    // Union(Intersection(v<=1, age<=5ms), age<=20ms)
    let rule = GcRule::union(vec![
        GcRule::intersection(vec![
            GcRule::max_versions(1).unwrap(),
            GcRule::max_age(Duration::from_millis(5)).unwrap(),
        ])
        .unwrap(),
        GcRule::max_age(Duration::from_millis(20)).unwrap(),
    ])
    .unwrap();
    let now = Timestamp::from_millis(100);

    // 30ms old: outer age child fires regardless of rank.
    assert!(rule.is_garbage(&cell(1, 70), now));

    // 10ms old, rank 2: inner intersection fires (rank > 1 AND older
    // than 5ms); outer age does not.
    assert!(rule.is_garbage(&cell(2, 90), now));

    // 10ms old, rank 1: nothing fires.
    assert!(!rule.is_garbage(&cell(1, 90), now));
}

#[test]
fn test_rule_config_resolution() {
    // The declarative shape with both bounds resolves only with an
    // explicit combinator.
    let union = RuleConfig::new()
        .versions(2)
        .age(Duration::from_millis(5))
        .union()
        .build()
        .unwrap();
    assert!(matches!(union, GcRule::Union(ref c) if c.len() == 2));

    let intersection = RuleConfig::new()
        .versions(2)
        .age(Duration::from_millis(5))
        .intersection()
        .build()
        .unwrap();
    assert!(matches!(intersection, GcRule::Intersection(ref c) if c.len() == 2));

    let ambiguous = RuleConfig::new()
        .versions(2)
        .age(Duration::from_millis(5))
        .build()
        .unwrap_err();
    assert!(ambiguous.is_invalid_rule());
}

#[test]
fn test_descriptor_round_trip_depth_three() {
    let rule = GcRule::union(vec![
        GcRule::intersection(vec![
            GcRule::max_versions(3).unwrap(),
            GcRule::union(vec![
                GcRule::max_age(Duration::from_millis(250)).unwrap(),
                GcRule::max_versions(1).unwrap(),
            ])
            .unwrap(),
        ])
        .unwrap(),
        GcRule::max_age(Duration::new(86_400, 0)).unwrap(),
    ])
    .unwrap();

    let descriptor = rule.to_descriptor();
    assert_eq!(GcRule::from_descriptor(&descriptor).unwrap(), rule);

    // And through JSON, which is how the descriptor actually travels.
    let json = descriptor.to_json().unwrap();
    let decoded = tabulet::RuleDescriptor::from_json(&json).unwrap();
    assert_eq!(GcRule::from_descriptor(&decoded).unwrap(), rule);
}

#[test]
fn test_evaluation_is_deterministic() {
    let rule = GcRule::union(vec![
        GcRule::max_versions(2).unwrap(),
        GcRule::max_age(Duration::from_millis(5)).unwrap(),
    ])
    .unwrap();
    let now = Timestamp::from_millis(100);
    let c = cell(2, 97);

    let first = rule.is_garbage(&c, now);
    for _ in 0..100 {
        assert_eq!(rule.is_garbage(&c, now), first);
    }
}
