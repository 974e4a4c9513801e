//! Office → Wing → DEC hierarchy index
//!
//! [`Hierarchy`] indexes the three reference lists by identity. Duplicate
//! identities are resolved last-write-wins. Broken links are reported by
//! [`Hierarchy::validate`] rather than rejected on construction, since
//! reference data is read-mostly and display must keep working.

use crate::error::{HierarchyViolation, ModelError, ModelResult};
use crate::ids::{DecId, OfficeId, WingId};
use crate::reference::{Dec, Office, Wing};
use std::collections::{BTreeMap, HashSet};

/// Indexed reference hierarchy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    offices: BTreeMap<OfficeId, Office>,
    wings: BTreeMap<WingId, Wing>,
    decs: BTreeMap<DecId, Dec>,
}

impl Hierarchy {
    /// Index the three reference lists
    #[must_use]
    pub fn new(
        offices: impl IntoIterator<Item = Office>,
        wings: impl IntoIterator<Item = Wing>,
        decs: impl IntoIterator<Item = Dec>,
    ) -> Self {
        Self {
            offices: offices.into_iter().map(|o| (o.id, o)).collect(),
            wings: wings.into_iter().map(|w| (w.id, w)).collect(),
            decs: decs.into_iter().map(|d| (d.id, d)).collect(),
        }
    }

    /// Office by identity
    #[inline]
    #[must_use]
    pub fn office(&self, id: OfficeId) -> Option<&Office> {
        self.offices.get(&id)
    }

    /// Wing by identity
    #[inline]
    #[must_use]
    pub fn wing(&self, id: WingId) -> Option<&Wing> {
        self.wings.get(&id)
    }

    /// DEC by identity
    #[inline]
    #[must_use]
    pub fn dec(&self, id: DecId) -> Option<&Dec> {
        self.decs.get(&id)
    }

    /// All offices, ordered by identity
    pub fn offices(&self) -> impl Iterator<Item = &Office> {
        self.offices.values()
    }

    /// All wings, ordered by identity
    pub fn wings(&self) -> impl Iterator<Item = &Wing> {
        self.wings.values()
    }

    /// All DECs, ordered by identity
    pub fn decs(&self) -> impl Iterator<Item = &Dec> {
        self.decs.values()
    }

    /// Active, non-deleted offices
    pub fn active_offices(&self) -> impl Iterator<Item = &Office> {
        self.offices.values().filter(|o| o.is_live())
    }

    /// Offices with no parent
    pub fn root_offices(&self) -> impl Iterator<Item = &Office> {
        self.offices.values().filter(|o| o.parent_id.is_none())
    }

    /// Direct child offices
    pub fn children_of(&self, office: OfficeId) -> impl Iterator<Item = &Office> {
        self.offices
            .values()
            .filter(move |o| o.parent_id == Some(office))
    }

    /// Wings owned by an office
    pub fn wings_of(&self, office: OfficeId) -> impl Iterator<Item = &Wing> {
        self.wings.values().filter(move |w| w.office_id == office)
    }

    /// DECs owned by a wing
    pub fn decs_of(&self, wing: WingId) -> impl Iterator<Item = &Dec> {
        self.decs.values().filter(move |d| d.wing_id == wing)
    }

    /// Parent chain of an office, nearest first
    ///
    /// Stops at a root, a missing parent, or the first repeated office.
    #[must_use]
    pub fn ancestors(&self, office: OfficeId) -> Vec<OfficeId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([office]);
        let mut current = self.offices.get(&office).and_then(|o| o.parent_id);

        while let Some(parent) = current {
            if !seen.insert(parent) {
                break;
            }
            chain.push(parent);
            current = self.offices.get(&parent).and_then(|o| o.parent_id);
        }
        chain
    }

    /// Whether an office sits on a parent cycle
    #[must_use]
    pub fn in_cycle(&self, office: OfficeId) -> bool {
        let mut seen = HashSet::new();
        let mut current = self.offices.get(&office).and_then(|o| o.parent_id);

        while let Some(parent) = current {
            if parent == office {
                return true;
            }
            if !seen.insert(parent) {
                return false;
            }
            current = self.offices.get(&parent).and_then(|o| o.parent_id);
        }
        false
    }

    /// Report every broken link, in office, wing, DEC order
    #[must_use]
    pub fn validate(&self) -> Vec<HierarchyViolation> {
        let mut violations = Vec::new();

        for office in self.offices.values() {
            let Some(parent) = office.parent_id else {
                continue;
            };
            match self.offices.get(&parent) {
                None => violations.push(HierarchyViolation::MissingParentOffice {
                    office: office.id,
                    parent,
                }),
                Some(p) if !p.is_live() => {
                    violations.push(HierarchyViolation::InactiveParentOffice {
                        office: office.id,
                        parent,
                    });
                }
                Some(_) => {}
            }
            if self.in_cycle(office.id) {
                violations.push(HierarchyViolation::OfficeCycle { office: office.id });
            }
        }

        for wing in self.wings.values() {
            if !self.offices.contains_key(&wing.office_id) {
                violations.push(HierarchyViolation::OrphanWing {
                    wing: wing.id,
                    office: wing.office_id,
                });
            }
        }

        for dec in self.decs.values() {
            if !self.wings.contains_key(&dec.wing_id) {
                violations.push(HierarchyViolation::OrphanDec {
                    dec: dec.id,
                    wing: dec.wing_id,
                });
            }
        }

        violations
    }

    /// Strict variant of [`Hierarchy::validate`]
    ///
    /// # Errors
    /// `ModelError::InvalidHierarchy` listing every violation found.
    pub fn ensure_valid(&self) -> ModelResult<()> {
        let violations = self.validate();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ModelError::InvalidHierarchy(violations))
        }
    }

    /// Number of offices, wings and DECs
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.offices.len(), self.wings.len(), self.decs.len())
    }

    /// True when no reference data is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offices.is_empty() && self.wings.is_empty() && self.decs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Hierarchy {
        Hierarchy::new(
            vec![
                Office::new(1, "Head Office"),
                Office::new(2, "Regional North").with_parent(1),
                Office::new(3, "District A").with_parent(2),
            ],
            vec![Wing::new(10, "Works", 2), Wing::new(11, "Stores", 3)],
            vec![Dec::new(100, "Circle 1", 10), Dec::new(101, "Circle 2", 10)],
        )
    }

    #[test]
    fn valid_hierarchy_has_no_violations() {
        assert!(sample().validate().is_empty());
        assert!(sample().ensure_valid().is_ok());
    }

    #[test]
    fn navigation() {
        let h = sample();
        assert_eq!(h.ancestors(OfficeId(3)), vec![OfficeId(2), OfficeId(1)]);
        assert_eq!(h.children_of(OfficeId(1)).count(), 1);
        assert_eq!(h.wings_of(OfficeId(2)).count(), 1);
        assert_eq!(h.decs_of(WingId(10)).count(), 2);
        assert_eq!(h.root_offices().count(), 1);
        assert_eq!(h.counts(), (3, 2, 2));
    }

    #[test]
    fn duplicate_ids_last_write_wins() {
        let h = Hierarchy::new(
            vec![Office::new(5, "First"), Office::new(5, "Second")],
            vec![],
            vec![],
        );
        assert_eq!(h.offices().count(), 1);
        assert_eq!(h.office(OfficeId(5)).unwrap().name, "Second");
    }

    #[test]
    fn missing_and_inactive_parents() {
        let h = Hierarchy::new(
            vec![
                Office::new(1, "Closed").inactive(),
                Office::new(2, "Child").with_parent(1),
                Office::new(3, "Stray").with_parent(99),
            ],
            vec![],
            vec![],
        );
        assert_eq!(
            h.validate(),
            vec![
                HierarchyViolation::InactiveParentOffice {
                    office: OfficeId(2),
                    parent: OfficeId(1),
                },
                HierarchyViolation::MissingParentOffice {
                    office: OfficeId(3),
                    parent: OfficeId(99),
                },
            ]
        );
    }

    #[test]
    fn cycles_are_reported_and_ancestors_terminate() {
        let h = Hierarchy::new(
            vec![
                Office::new(1, "A").with_parent(2),
                Office::new(2, "B").with_parent(1),
                Office::new(3, "C").with_parent(1),
            ],
            vec![],
            vec![],
        );
        let violations = h.validate();
        assert!(violations.contains(&HierarchyViolation::OfficeCycle { office: OfficeId(1) }));
        assert!(violations.contains(&HierarchyViolation::OfficeCycle { office: OfficeId(2) }));
        assert!(!violations.contains(&HierarchyViolation::OfficeCycle { office: OfficeId(3) }));
        assert_eq!(h.ancestors(OfficeId(3)), vec![OfficeId(1), OfficeId(2)]);
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let h = Hierarchy::new(vec![Office::new(1, "Loop").with_parent(1)], vec![], vec![]);
        assert!(h.in_cycle(OfficeId(1)));
        assert!(h.ancestors(OfficeId(1)).is_empty());
    }

    #[test]
    fn orphans_are_reported() {
        let h = Hierarchy::new(
            vec![Office::new(1, "HQ")],
            vec![Wing::new(10, "Lost", 7)],
            vec![Dec::new(100, "Adrift", 55)],
        );
        let err = h.ensure_valid().unwrap_err();
        match err {
            ModelError::InvalidHierarchy(v) => assert_eq!(
                v,
                vec![
                    HierarchyViolation::OrphanWing {
                        wing: WingId(10),
                        office: OfficeId(7),
                    },
                    HierarchyViolation::OrphanDec {
                        dec: DecId(100),
                        wing: WingId(55),
                    },
                ]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }
}
