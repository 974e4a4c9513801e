//! Error types for the model layer
//!
//! Most model operations are total: malformed ID lists normalize to empty
//! lists and unknown IDs resolve to placeholder labels. Errors here cover
//! the few places where a caller explicitly asks for strictness.

use crate::ids::{DecId, OfficeId, WingId};

/// A broken link in the office/wing/DEC hierarchy
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyViolation {
    /// Office references a parent that does not exist
    #[error("office {office} references missing parent office {parent}")]
    MissingParentOffice { office: OfficeId, parent: OfficeId },

    /// Office references a parent that is inactive or deleted
    #[error("office {office} references inactive parent office {parent}")]
    InactiveParentOffice { office: OfficeId, parent: OfficeId },

    /// Office is part of a parent cycle
    #[error("office {office} is part of a parent cycle")]
    OfficeCycle { office: OfficeId },

    /// Wing references an office that does not exist
    #[error("wing {wing} references missing office {office}")]
    OrphanWing { wing: WingId, office: OfficeId },

    /// DEC references a wing that does not exist
    #[error("dec {dec} references missing wing {wing}")]
    OrphanDec { dec: DecId, wing: WingId },
}

/// Model layer error
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Hierarchy failed strict validation
    #[error("hierarchy has {} violation(s)", .0.len())]
    InvalidHierarchy(Vec<HierarchyViolation>),

    /// Unrecognized role name
    #[error("unknown role: '{0}'")]
    UnknownRole(String),
}

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;
