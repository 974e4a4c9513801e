//! Summary and tooltip formatting for resolved names

use procura_model::EntityKind;
use std::fmt::Display;

/// Longest list shown in full before collapsing to `"+N more"`
pub const SUMMARY_LIMIT: usize = 3;

/// Compact one-line summary of a name list
///
/// - `[]` → `"No offices"` (per kind)
/// - `["A"]` → `"A"`
/// - up to three → `"A, B, C"`
/// - more → `"A, B + 2 more"`
#[must_use]
pub fn format_names_for_display<S: AsRef<str>>(names: &[S], kind: EntityKind) -> String {
    match names {
        [] => format!("No {}", kind.plural()),
        [only] => only.as_ref().to_owned(),
        _ if names.len() <= SUMMARY_LIMIT => join(names),
        [first, second, rest @ ..] => format!(
            "{}, {} + {} more",
            first.as_ref(),
            second.as_ref(),
            rest.len()
        ),
    }
}

/// `"<name> (ID: <id>)"` pairs joined by commas
///
/// Returns an empty string when the two lists differ in length.
#[must_use]
pub fn format_names_with_ids<S, I>(names: &[S], ids: &[I]) -> String
where
    S: AsRef<str>,
    I: Display,
{
    if names.len() != ids.len() {
        return String::new();
    }
    names
        .iter()
        .zip(ids)
        .map(|(name, id)| format!("{} (ID: {id})", name.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_model::RawId;

    #[test]
    fn summary_shapes() {
        let kind = EntityKind::Office;
        assert_eq!(format_names_for_display::<&str>(&[], kind), "No offices");
        assert_eq!(format_names_for_display(&["A"], kind), "A");
        assert_eq!(format_names_for_display(&["A", "B"], kind), "A, B");
        assert_eq!(format_names_for_display(&["A", "B", "C"], kind), "A, B, C");
        assert_eq!(
            format_names_for_display(&["A", "B", "C", "D"], kind),
            "A, B + 2 more"
        );
    }

    #[test]
    fn empty_text_per_kind() {
        assert_eq!(format_names_for_display::<String>(&[], EntityKind::Dec), "No DECs");
        assert_eq!(format_names_for_display::<String>(&[], EntityKind::Wing), "No wings");
    }

    #[test]
    fn tooltip_pairs() {
        assert_eq!(
            format_names_with_ids(&["A", "B"], &[1, 2]),
            "A (ID: 1), B (ID: 2)"
        );
        assert_eq!(
            format_names_with_ids(&["X"], &[RawId::from("07")]),
            "X (ID: 07)"
        );
    }

    #[test]
    fn tooltip_mismatch_is_empty() {
        assert_eq!(format_names_with_ids(&["A", "B"], &[1]), "");
        assert_eq!(format_names_with_ids::<&str, i64>(&[], &[]), "");
    }
}
