//! ID → name lookup
//!
//! [`NameResolver`] is built from the three reference lists and discarded
//! after use; it holds no state across resolution calls.

use procura_model::{Dec, EntityKind, Hierarchy, Office, RawId, ReferenceEntity, Wing};
use std::collections::HashMap;

/// Per-kind lookup tables of display names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameResolver {
    offices: HashMap<i64, String>,
    wings: HashMap<i64, String>,
    decs: HashMap<i64, String>,
}

fn index<'a, T>(items: impl IntoIterator<Item = &'a T>) -> HashMap<i64, String>
where
    T: ReferenceEntity + 'a,
{
    // Later entries overwrite earlier ones with the same identity
    items
        .into_iter()
        .map(|item| (item.key(), item.name().to_owned()))
        .collect()
}

impl NameResolver {
    /// Build lookup tables from the reference lists
    #[must_use]
    pub fn new(offices: &[Office], wings: &[Wing], decs: &[Dec]) -> Self {
        Self {
            offices: index(offices),
            wings: index(wings),
            decs: index(decs),
        }
    }

    /// Build lookup tables from an indexed hierarchy
    #[must_use]
    pub fn from_hierarchy(hierarchy: &Hierarchy) -> Self {
        Self {
            offices: index(hierarchy.offices()),
            wings: index(hierarchy.wings()),
            decs: index(hierarchy.decs()),
        }
    }

    fn table(&self, kind: EntityKind) -> &HashMap<i64, String> {
        match kind {
            EntityKind::Office => &self.offices,
            EntityKind::Wing => &self.wings,
            EntityKind::Dec => &self.decs,
        }
    }

    /// Stored name for a numeric identity
    #[inline]
    #[must_use]
    pub fn name_of(&self, kind: EntityKind, id: i64) -> Option<&str> {
        self.table(kind).get(&id).map(String::as_str)
    }

    /// Number of distinct identities known for a kind
    #[inline]
    #[must_use]
    pub fn len(&self, kind: EntityKind) -> usize {
        self.table(kind).len()
    }

    /// True when no reference data was supplied at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offices.is_empty() && self.wings.is_empty() && self.decs.is_empty()
    }

    /// Resolve one reference, falling back to `"<Kind>-<id>"`
    #[must_use]
    pub fn resolve_one(&self, kind: EntityKind, id: &RawId) -> String {
        match id.as_numeric().and_then(|n| self.name_of(kind, n)) {
            Some(name) => name.to_owned(),
            None => {
                tracing::debug!(kind = %kind, id = %id, "unresolved reference");
                format!("{}-{}", kind.label_prefix(), id)
            }
        }
    }

    /// Resolve a list of references; output has the same length and order
    #[must_use]
    pub fn resolve(&self, kind: EntityKind, ids: &[RawId]) -> Vec<String> {
        ids.iter().map(|id| self.resolve_one(kind, id)).collect()
    }
}
