//! Identifiers and ID-list normalization
//!
//! Reference entities are keyed by integer IDs. Tender association fields
//! carry lists of those IDs, but historically arrive in several shapes:
//!
//! - a native JSON array (`[1, 2]`, `["1", "2"]`)
//! - a JSON-encoded string (`"[1,2]"`)
//! - `null` or a missing field
//!
//! [`IdList`] deserializes all of them through [`normalize_ids`], which
//! never fails: anything unparseable becomes an empty list.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::Deref;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Raw numeric value
            #[inline]
            #[must_use]
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Office identifier
    OfficeId
);
entity_id!(
    /// Wing identifier
    WingId
);
entity_id!(
    /// DEC identifier
    DecId
);
entity_id!(
    /// Tender identifier
    TenderId
);
entity_id!(
    /// Delivery identifier
    DeliveryId
);

/// One ID reference exactly as it arrived on the wire
///
/// Elements of an association list may be numbers or numeric text. The
/// original form is kept so unresolved references can be labelled with
/// what the caller actually sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Integer reference
    Number(i64),
    /// Textual reference (usually numeric text)
    Text(String),
}

impl RawId {
    /// Coerce to a numeric identity, if possible
    #[must_use]
    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    fn from_element(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(integral))
                .map_or_else(|| Self::Text(n.to_string()), Self::Number),
            Value::String(text) => Self::Text(text.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integral(value: f64) -> Option<i64> {
    let in_range = value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value <= i64::MAX as f64;
    in_range.then_some(value as i64)
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for RawId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Normalized, ordered list of ID references
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IdList(Vec<RawId>);

impl IdList {
    /// Create empty list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the references
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[RawId] {
        &self.0
    }

    /// Numeric identities of all coercible references, in order
    #[must_use]
    pub fn numeric(&self) -> Vec<i64> {
        self.0.iter().filter_map(RawId::as_numeric).collect()
    }

    /// Consume into the underlying vector
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<RawId> {
        self.0
    }
}

impl Deref for IdList {
    type Target = [RawId];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<RawId>> for IdList {
    fn from(ids: Vec<RawId>) -> Self {
        Self(ids)
    }
}

impl From<Vec<i64>> for IdList {
    fn from(ids: Vec<i64>) -> Self {
        ids.into_iter().map(RawId::Number).collect()
    }
}

impl FromIterator<RawId> for IdList {
    fn from_iter<I: IntoIterator<Item = RawId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for IdList {
    type Item = RawId;
    type IntoIter = std::vec::IntoIter<RawId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a IdList {
    type Item = &'a RawId;
    type IntoIter = std::slice::Iter<'a, RawId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for IdList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(normalize_ids(&value))
    }
}

/// Normalize an association field into an [`IdList`]
///
/// - `null` → empty
/// - JSON-encoded string → parsed array; parse failure or a non-array
///   payload → empty
/// - native array → elements passed through in order
/// - anything else → empty
#[must_use]
pub fn normalize_ids(value: &Value) -> IdList {
    match value {
        Value::Array(items) => items.iter().map(RawId::from_element).collect(),
        Value::String(encoded) => parse_encoded(encoded),
        _ => IdList::default(),
    }
}

fn parse_encoded(encoded: &str) -> IdList {
    let trimmed = encoded.trim();
    if trimmed.is_empty() {
        return IdList::default();
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => items.iter().map(RawId::from_element).collect(),
        _ => IdList::default(),
    }
}
