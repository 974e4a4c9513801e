//! Reference entities: offices, wings and DECs
//!
//! Wire shapes are camelCase (`parentId`, `officeId`, `wingId`) and are
//! the single deserialization contract for each list.

use crate::ids::{DecId, OfficeId, WingId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_true() -> bool {
    true
}

/// Kind of reference entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Top-level organizational unit
    Office,
    /// Subdivision of an office
    Wing,
    /// Development/Executive Circle, subdivision of a wing
    Dec,
}

impl EntityKind {
    /// All kinds, leaves last
    pub const ALL: [EntityKind; 3] = [EntityKind::Office, EntityKind::Wing, EntityKind::Dec];

    /// Prefix used for placeholder labels (`Office-7`)
    #[inline]
    #[must_use]
    pub fn label_prefix(self) -> &'static str {
        match self {
            Self::Office => "Office",
            Self::Wing => "Wing",
            Self::Dec => "DEC",
        }
    }

    /// Plural noun used in summaries (`No offices`)
    #[inline]
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::Office => "offices",
            Self::Wing => "wings",
            Self::Dec => "DECs",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label_prefix())
    }
}

/// Common view over offices, wings and DECs
pub trait ReferenceEntity {
    /// Which list this entity belongs to
    const KIND: EntityKind;

    /// Numeric identity
    fn key(&self) -> i64;

    /// Display name
    fn name(&self) -> &str;

    /// Identity of the owning entity, if any
    fn parent_key(&self) -> Option<i64>;

    /// Whether the entity should appear in active listings
    fn is_active(&self) -> bool;
}

/// Office record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Office {
    /// Identity
    pub id: OfficeId,
    /// Display name
    pub name: String,
    /// Parent office (self-referential hierarchy)
    #[serde(default)]
    pub parent_id: Option<OfficeId>,
    /// Postal address
    #[serde(default)]
    pub address: Option<String>,
    /// Contact phone
    #[serde(default)]
    pub contact_phone: Option<String>,
    /// Contact email
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Active flag
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Soft-delete flag
    #[serde(default)]
    pub is_deleted: bool,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Office {
    /// Create active top-level office
    #[must_use]
    pub fn new(id: impl Into<OfficeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            address: None,
            contact_phone: None,
            contact_email: None,
            is_active: true,
            is_deleted: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// With parent office
    #[inline]
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<OfficeId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    /// Mark inactive
    #[inline]
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Active and not soft-deleted
    #[inline]
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.is_active && !self.is_deleted
    }
}

impl ReferenceEntity for Office {
    const KIND: EntityKind = EntityKind::Office;

    fn key(&self) -> i64 {
        self.id.0
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parent_key(&self) -> Option<i64> {
        self.parent_id.map(OfficeId::get)
    }

    fn is_active(&self) -> bool {
        self.is_live()
    }
}

/// Wing record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wing {
    /// Identity
    pub id: WingId,
    /// Display name
    pub name: String,
    /// Owning office
    pub office_id: OfficeId,
    /// Active flag
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Wing {
    /// Create active wing under an office
    #[must_use]
    pub fn new(
        id: impl Into<WingId>,
        name: impl Into<String>,
        office_id: impl Into<OfficeId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            office_id: office_id.into(),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// Mark inactive
    #[inline]
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

impl ReferenceEntity for Wing {
    const KIND: EntityKind = EntityKind::Wing;

    fn key(&self) -> i64 {
        self.id.0
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parent_key(&self) -> Option<i64> {
        Some(self.office_id.0)
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// DEC record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dec {
    /// Identity
    pub id: DecId,
    /// Display name
    pub name: String,
    /// Owning wing
    pub wing_id: WingId,
    /// Active flag
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Dec {
    /// Create active DEC under a wing
    #[must_use]
    pub fn new(id: impl Into<DecId>, name: impl Into<String>, wing_id: impl Into<WingId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            wing_id: wing_id.into(),
            is_active: true,
        }
    }

    /// Mark inactive
    #[inline]
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

impl ReferenceEntity for Dec {
    const KIND: EntityKind = EntityKind::Dec;

    fn key(&self) -> i64 {
        self.id.0
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parent_key(&self) -> Option<i64> {
        Some(self.wing_id.0)
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn office_wire_shape() {
        let office: Office =
            serde_json::from_value(json!({"id": 2, "name": "Regional", "parentId": 1})).unwrap();
        assert_eq!(office.parent_id, Some(OfficeId(1)));
        assert!(office.is_live());
    }

    #[test]
    fn wing_requires_office() {
        let result: Result<Wing, _> = serde_json::from_value(json!({"id": 1, "name": "North"}));
        assert!(result.is_err());
    }

    #[test]
    fn dec_wire_shape() {
        let dec: Dec = serde_json::from_value(
            json!({"id": 4, "name": "Circle A", "wingId": 3, "isActive": false}),
        )
        .unwrap();
        assert_eq!(dec.wing_id, WingId(3));
        assert!(!ReferenceEntity::is_active(&dec));
    }

    #[test]
    fn deleted_office_is_not_active() {
        let mut office = Office::new(1, "HQ");
        office.is_deleted = true;
        assert!(!ReferenceEntity::is_active(&office));
    }

    #[test]
    fn kind_labels() {
        assert_eq!(EntityKind::Dec.label_prefix(), "DEC");
        assert_eq!(EntityKind::Office.plural(), "offices");
        assert_eq!(EntityKind::Wing.to_string(), "Wing");
    }
}
