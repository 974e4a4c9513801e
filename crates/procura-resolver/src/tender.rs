//! Tender association read path
//!
//! A tender's `office_ids`, `wing_ids` and `dec_ids` go through the same
//! normalize → resolve → format pipeline so the three columns of a report
//! always look alike.

use crate::format::{format_names_for_display, format_names_with_ids};
use crate::resolver::NameResolver;
use procura_model::{normalize_ids, EntityKind, IdList, Tender, TenderId};
use serde::Serialize;
use serde_json::Value;

static NULL: Value = Value::Null;

/// Display strings for one association field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssociationLabels {
    /// Which list the IDs point into
    pub kind: EntityKind,
    /// Normalized references
    pub ids: IdList,
    /// Resolved names, same length as `ids`
    pub names: Vec<String>,
    /// Compact summary
    pub summary: String,
    /// Hover text
    pub tooltip: String,
}

impl AssociationLabels {
    /// Resolve an already-normalized list
    #[must_use]
    pub fn resolve(kind: EntityKind, ids: &IdList, resolver: &NameResolver) -> Self {
        let names = resolver.resolve(kind, ids);
        let summary = format_names_for_display(&names, kind);
        let tooltip = format_names_with_ids(&names, ids.as_slice());
        Self {
            kind,
            ids: ids.clone(),
            names,
            summary,
            tooltip,
        }
    }

    /// Normalize a raw field value, then resolve it
    #[must_use]
    pub fn from_raw(kind: EntityKind, raw: &Value, resolver: &NameResolver) -> Self {
        Self::resolve(kind, &normalize_ids(raw), resolver)
    }

    /// Count of references that did not resolve to a stored name
    #[must_use]
    pub fn unresolved(&self, resolver: &NameResolver) -> usize {
        self.ids
            .iter()
            .filter(|id| {
                id.as_numeric()
                    .and_then(|n| resolver.name_of(self.kind, n))
                    .is_none()
            })
            .count()
    }
}

/// Display strings for all three association fields of a tender
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenderLabels {
    /// Tender the labels belong to
    pub tender_id: TenderId,
    /// Office column
    pub offices: AssociationLabels,
    /// Wing column
    pub wings: AssociationLabels,
    /// DEC column
    pub decs: AssociationLabels,
}

impl TenderLabels {
    /// Resolve every association of a tender
    #[must_use]
    pub fn from_tender(tender: &Tender, resolver: &NameResolver) -> Self {
        Self {
            tender_id: tender.id,
            offices: AssociationLabels::resolve(EntityKind::Office, &tender.office_ids, resolver),
            wings: AssociationLabels::resolve(EntityKind::Wing, &tender.wing_ids, resolver),
            decs: AssociationLabels::resolve(EntityKind::Dec, &tender.dec_ids, resolver),
        }
    }

    /// Resolve a raw tender row without deserializing the rest of it
    ///
    /// Missing association fields are treated as null.
    #[must_use]
    pub fn from_row(tender_id: TenderId, row: &Value, resolver: &NameResolver) -> Self {
        let field = |name: &str| row.get(name).unwrap_or(&NULL);
        Self {
            tender_id,
            offices: AssociationLabels::from_raw(EntityKind::Office, field("office_ids"), resolver),
            wings: AssociationLabels::from_raw(EntityKind::Wing, field("wing_ids"), resolver),
            decs: AssociationLabels::from_raw(EntityKind::Dec, field("dec_ids"), resolver),
        }
    }

    /// The three columns in office, wing, DEC order
    #[must_use]
    pub fn columns(&self) -> [&AssociationLabels; 3] {
        [&self.offices, &self.wings, &self.decs]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use procura_model::{Dec, Office, Wing};
    use serde_json::json;

    fn resolver() -> NameResolver {
        NameResolver::new(
            &[
                Office::new(1, "Head Office"),
                Office::new(2, "North"),
                Office::new(3, "South"),
                Office::new(4, "East"),
            ],
            &[Wing::new(10, "Works", 1)],
            &[Dec::new(100, "Circle 1", 10)],
        )
    }

    #[test]
    fn tender_columns() {
        let tender = Tender::new(1, "Cement").with_associations(
            vec![1, 2, 3, 4],
            vec![10],
            IdList::new(),
        );
        let labels = TenderLabels::from_tender(&tender, &resolver());

        assert_eq!(labels.offices.summary, "Head Office, North + 2 more");
        assert_eq!(labels.wings.summary, "Works");
        assert_eq!(labels.wings.tooltip, "Works (ID: 10)");
        assert_eq!(labels.decs.summary, "No DECs");
        assert_eq!(labels.decs.tooltip, "");
    }

    #[test]
    fn raw_row_uses_uniform_normalization() {
        let row = json!({
            "office_ids": "[1, 9]",
            "wing_ids": ["10"],
            "dec_ids": "not-json"
        });
        let labels = TenderLabels::from_row(TenderId(5), &row, &resolver());

        assert_eq!(labels.offices.names, vec!["Head Office", "Office-9"]);
        assert_eq!(labels.offices.tooltip, "Head Office (ID: 1), Office-9 (ID: 9)");
        assert_eq!(labels.wings.names, vec!["Works"]);
        assert!(labels.decs.names.is_empty());
    }

    #[test]
    fn missing_fields_are_empty() {
        let labels = TenderLabels::from_row(TenderId(5), &json!({}), &resolver());
        for column in labels.columns() {
            assert!(column.ids.is_empty());
        }
    }

    #[test]
    fn unresolved_count() {
        let r = resolver();
        let labels = AssociationLabels::from_raw(EntityKind::Office, &json!([1, 8, "x"]), &r);
        assert_eq!(labels.unresolved(&r), 2);
    }
}
