//! Tests for the deprecated flat-format adapter.

use super::*;

#[test]
fn empty_legacy_policy_is_not_defined() {
    assert!(!LegacyPolicy::default().is_defined());
}

#[test]
fn any_single_legacy_field_makes_it_defined() {
    let protect = LegacyPolicy {
        protect: Some(false),
        ..LegacyPolicy::default()
    };
    let contexts = LegacyPolicy {
        contexts: Some(vec![]),
        ..LegacyPolicy::default()
    };
    let pushers = LegacyPolicy {
        pushers: Some(vec!["release".to_string()]),
        ..LegacyPolicy::default()
    };
    assert!(protect.is_defined());
    assert!(contexts.is_defined());
    assert!(pushers.is_defined());
}

#[test]
fn to_policy_translates_all_three_fields() {
    let legacy = LegacyPolicy {
        protect: Some(true),
        contexts: Some(vec!["ci/build".to_string()]),
        pushers: Some(vec!["admins".to_string()]),
    };

    let policy = legacy.to_policy();
    assert_eq!(policy.protect, Some(true));
    assert_eq!(
        policy.required_status_checks.unwrap().contexts,
        Some(vec!["ci/build".to_string()])
    );
    let restrictions = policy.restrictions.unwrap();
    assert_eq!(restrictions.teams, Some(vec!["admins".to_string()]));
    assert_eq!(restrictions.users, None);
}

#[test]
fn to_policy_leaves_unset_fields_unset() {
    let legacy = LegacyPolicy {
        protect: Some(false),
        ..LegacyPolicy::default()
    };

    let policy = legacy.to_policy();
    assert_eq!(policy.protect, Some(false));
    assert!(policy.required_status_checks.is_none());
    assert!(policy.restrictions.is_none());
}

#[test]
fn legacy_wire_names_round_trip() {
    let json = r#"{
        "protect-by-default": true,
        "require-contexts": ["ci/build"],
        "allow-push": ["oncall"]
    }"#;
    let legacy: LegacyPolicy = serde_json::from_str(json).unwrap();
    assert_eq!(legacy.protect, Some(true));
    assert_eq!(legacy.contexts, Some(vec!["ci/build".to_string()]));
    assert_eq!(legacy.pushers, Some(vec!["oncall".to_string()]));

    let serialized = serde_json::to_value(&legacy).unwrap();
    assert!(serialized.get("protect-by-default").is_some());
    assert!(serialized.get("protect").is_none());
}

#[test]
fn tracker_warns_exactly_once() {
    let tracker = DeprecationTracker::new();
    assert!(!tracker.has_warned());
    tracker.warn_once();
    assert!(tracker.has_warned());
    tracker.warn_once();
    assert!(tracker.has_warned());
}

#[test]
fn tracker_is_warned_once_under_concurrent_use() {
    use std::sync::Arc;

    let tracker = Arc::new(DeprecationTracker::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tracker = Arc::clone(&tracker);
            std::thread::spawn(move || tracker.warn_once())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert!(tracker.has_warned());
}
