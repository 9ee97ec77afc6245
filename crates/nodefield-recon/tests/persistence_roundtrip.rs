//! Save/reload behavior: payload in, payload out, values restored.

use std::collections::BTreeMap;

use nodefield_core::{FieldValue, NodePersistState};
use nodefield_harness::fixtures;
use nodefield_recon::ReconcileOutcome;

fn payload(count: i64, entries: &[(u32, &str)]) -> NodePersistState {
    NodePersistState {
        count,
        range: None,
        entries: entries
            .iter()
            .map(|(i, v)| (*i, (*v).to_owned()))
            .collect::<BTreeMap<_, _>>(),
    }
}

#[test]
fn loaded_node_restores_saved_values_and_defaults_the_rest() {
    let (mut node, mut recon, options) = fixtures::picker();
    let saved = payload(
        4,
        &[
            (1, "alpha_set.bin"),
            (2, "bravo_set.bin"),
            (3, "charlie_set.bin"),
            (4, "delta_set.bin"),
        ],
    );

    recon.attach(&node);
    recon.load(&mut node, &saved);
    // The payload's count wins over whatever the host field held.
    assert_eq!(node.field_value("entry_count"), Some(FieldValue::Int(4)));

    recon.ready(&mut node, &options);
    assert_eq!(node.entry_fields("entry_").len(), 4);

    // Growing past the saved count: saved values stay, new slots default.
    let event = node.edit("entry_count", 6);
    recon.observe(&mut node, &options, &event);
    for (name, expected) in [
        ("entry_1", "alpha_set.bin"),
        ("entry_2", "bravo_set.bin"),
        ("entry_3", "charlie_set.bin"),
        ("entry_4", "delta_set.bin"),
        ("entry_5", "alpha_set.bin"),
        ("entry_6", "alpha_set.bin"),
    ] {
        assert_eq!(
            node.field_value(name),
            Some(FieldValue::text(expected)),
            "{name}"
        );
    }
}

#[test]
fn load_defers_reconcile_until_ready() {
    let (mut node, mut recon, options) = fixtures::picker();
    recon.attach(&node);
    recon.load(&mut node, &payload(3, &[(1, "alpha_set.bin")]));

    assert!(recon.has_pending());
    assert!(node.entry_fields("entry_").is_empty());

    let outcome = recon.ready(&mut node, &options);
    assert!(matches!(outcome, ReconcileOutcome::Applied { count: 3, .. }));
    assert_eq!(node.entry_fields("entry_").len(), 3);
}

#[test]
fn out_of_range_saved_entries_survive_for_later_growth() {
    let (mut node, mut recon, options) = fixtures::picker();
    // Entry 9 was populated in a previous session with a higher count.
    let saved = payload(2, &[(1, "bravo_set.bin"), (9, "echo_set.bin")]);

    recon.attach(&node);
    recon.load(&mut node, &saved);
    recon.ready(&mut node, &options);
    assert_eq!(node.entry_fields("entry_").len(), 2);

    let event = node.edit("entry_count", 9);
    recon.observe(&mut node, &options, &event);
    assert_eq!(
        node.field_value("entry_9"),
        Some(FieldValue::text("echo_set.bin"))
    );
}

#[test]
fn persist_captures_live_edits_made_since_last_pass() {
    let (mut node, mut recon, options) = fixtures::picker();
    recon.attach(&node);
    recon.ready(&mut node, &options);

    // Edit a field directly without routing the event anywhere, as a host
    // with its own change plumbing might.
    node.edit("entry_2", "foxtrot_set.bin");
    node.edit("index", 2);

    let state = recon.persist_state(&node);
    assert_eq!(state.count, 5);
    assert_eq!(state.range, Some(2));
    assert_eq!(state.entries.get(&2).map(String::as_str), Some("foxtrot_set.bin"));
}

#[test]
fn persisted_payload_roundtrips_through_json() {
    let (mut node, mut recon, options) = fixtures::picker();
    recon.attach(&node);
    recon.ready(&mut node, &options);
    let event = node.edit("entry_3", "charlie_set.bin");
    recon.observe(&mut node, &options, &event);

    let state = recon.persist_state(&node);
    let json = serde_json::to_string(&state).unwrap();
    let back: NodePersistState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);

    // A second node loads the payload and reproduces the field set.
    let (mut node2, mut recon2, _) = fixtures::picker();
    recon2.attach(&node2);
    recon2.load(&mut node2, &back);
    recon2.ready(&mut node2, &options);
    assert_eq!(
        node2.field_value("entry_3"),
        Some(FieldValue::text("charlie_set.bin"))
    );
    assert_eq!(node2.entry_fields("entry_").len(), 5);
}

#[test]
fn malformed_saved_count_coerces_on_load() {
    let (mut node, mut recon, options) = fixtures::picker();
    recon.attach(&node);
    recon.load(&mut node, &payload(-7, &[]));
    recon.ready(&mut node, &options);
    assert_eq!(node.entry_fields("entry_").len(), 1);

    let (mut node2, mut recon2, _) = fixtures::picker();
    recon2.attach(&node2);
    recon2.load(&mut node2, &payload(500, &[]));
    recon2.ready(&mut node2, &options);
    assert_eq!(node2.entry_fields("entry_").len(), 20);
}
