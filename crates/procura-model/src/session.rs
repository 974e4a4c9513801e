//! Caller context passed explicitly to scoped operations

use crate::error::ModelError;
use crate::ids::{OfficeId, WingId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Caller role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sees every office
    Admin,
    /// Manages an office
    Manager,
    /// Works within an office or wing
    Staff,
    /// Read-only
    #[default]
    Viewer,
}

impl Role {
    /// Whether queries for this role are narrowed to the session's office/wing
    #[inline]
    #[must_use]
    pub fn is_scoped(self) -> bool {
        !matches!(self, Self::Admin)
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "staff" => Ok(Self::Staff),
            "viewer" => Ok(Self::Viewer),
            other => Err(ModelError::UnknownRole(other.to_owned())),
        }
    }
}

/// Current user and organizational context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Acting user
    pub user_id: String,
    /// Role of the acting user
    pub role: Role,
    /// Office the user works in
    #[serde(default)]
    pub office_id: Option<OfficeId>,
    /// Wing the user works in
    #[serde(default)]
    pub wing_id: Option<WingId>,
}

impl Session {
    /// Create session with no organizational context
    #[must_use]
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            office_id: None,
            wing_id: None,
        }
    }

    /// With office context
    #[inline]
    #[must_use]
    pub fn with_office(mut self, office: impl Into<OfficeId>) -> Self {
        self.office_id = Some(office.into());
        self
    }

    /// With wing context
    #[inline]
    #[must_use]
    pub fn with_wing(mut self, wing: impl Into<WingId>) -> Self {
        self.wing_id = Some(wing.into());
        self
    }

    /// Named parameters identifying the caller and narrowing scoped queries
    ///
    /// `user_id` is always present; office and wing are only included for
    /// scoped roles.
    #[must_use]
    pub fn scope_params(&self) -> Vec<(&'static str, Value)> {
        let mut params = vec![("user_id", Value::from(self.user_id.clone()))];
        if self.role.is_scoped() {
            if let Some(office) = self.office_id {
                params.push(("office_id", Value::from(office.get())));
            }
            if let Some(wing) = self.wing_id {
                params.push(("wing_id", Value::from(wing.get())));
            }
        }
        params
    }
}
