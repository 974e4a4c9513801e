use procura_model::{EntityKind, IdList, Office, RawId};
use procura_resolver::{format_names_for_display, format_names_with_ids, NameResolver};
use proptest::prelude::*;
use std::collections::HashMap;

fn offices_strategy() -> impl Strategy<Value = Vec<(i64, String)>> {
    proptest::collection::vec((0..50i64, "[A-Z][a-z]{1,8}"), 0..30)
}

fn ids_strategy() -> impl Strategy<Value = Vec<RawId>> {
    proptest::collection::vec(
        prop_oneof![
            (0..80i64).prop_map(RawId::Number),
            (0..80i64).prop_map(|n| RawId::Text(n.to_string())),
            "[a-z]{1,4}".prop_map(RawId::Text),
        ],
        0..25,
    )
}

proptest! {
    #[test]
    fn prop_resolution_is_total_and_length_preserving(
        offices in offices_strategy(),
        ids in ids_strategy(),
    ) {
        let records: Vec<Office> = offices.iter().map(|(id, name)| Office::new(*id, name.clone())).collect();
        // Expected map with last-write-wins semantics
        let expected: HashMap<i64, String> = offices.into_iter().collect();
        let resolver = NameResolver::new(&records, &[], &[]);

        let names = resolver.resolve(EntityKind::Office, &ids);
        prop_assert_eq!(names.len(), ids.len());

        for (name, id) in names.iter().zip(&ids) {
            match id.as_numeric().and_then(|n| expected.get(&n)) {
                Some(stored) => prop_assert_eq!(name, stored),
                None => prop_assert_eq!(name, &format!("Office-{id}")),
            }
        }
    }

    #[test]
    fn prop_resolution_is_idempotent(offices in offices_strategy(), ids in ids_strategy()) {
        let records: Vec<Office> = offices.iter().map(|(id, name)| Office::new(*id, name.clone())).collect();
        let resolver = NameResolver::new(&records, &[], &[]);
        prop_assert_eq!(
            resolver.resolve(EntityKind::Office, &ids),
            resolver.resolve(EntityKind::Office, &ids)
        );
    }

    #[test]
    fn prop_summary_shape(names in proptest::collection::vec("[A-Z][a-z]{0,6}", 0..10)) {
        let summary = format_names_for_display(&names, EntityKind::Wing);
        match names.len() {
            0 => prop_assert_eq!(summary, "No wings"),
            1..=3 => prop_assert_eq!(summary, names.join(", ")),
            n => prop_assert_eq!(
                summary,
                format!("{}, {} + {} more", names[0], names[1], n - 2)
            ),
        }
    }

    #[test]
    fn prop_tooltip_empty_on_mismatch(
        names in proptest::collection::vec("[a-z]{1,5}", 0..6),
        ids in proptest::collection::vec(0..100i64, 0..6),
    ) {
        let tooltip = format_names_with_ids(&names, &ids);
        if names.len() == ids.len() {
            prop_assert_eq!(tooltip.matches("(ID: ").count(), names.len());
        } else {
            prop_assert!(tooltip.is_empty());
        }
    }
}

#[test]
fn documented_examples() {
    assert_eq!(format_names_for_display::<&str>(&[], EntityKind::Office), "No offices");
    assert_eq!(format_names_for_display(&["A"], EntityKind::Office), "A");
    assert_eq!(format_names_for_display(&["A", "B", "C"], EntityKind::Office), "A, B, C");
    assert_eq!(
        format_names_for_display(&["A", "B", "C", "D"], EntityKind::Office),
        "A, B + 2 more"
    );
    assert_eq!(format_names_with_ids(&["A", "B"], &[1, 2]), "A (ID: 1), B (ID: 2)");
    assert_eq!(format_names_with_ids(&["A", "B"], &[1]), "");
}

#[test]
fn duplicate_reference_ids_keep_later_name() {
    let resolver = NameResolver::new(
        &[Office::new(5, "Earlier"), Office::new(5, "Later")],
        &[],
        &[],
    );
    assert_eq!(resolver.len(EntityKind::Office), 1);
    assert_eq!(
        resolver.resolve(EntityKind::Office, &IdList::from(vec![5])),
        vec!["Later"]
    );
}
