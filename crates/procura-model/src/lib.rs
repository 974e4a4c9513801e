//! Procura Model
//!
//! Typed records for the procurement reference hierarchy and the
//! transactional records that point into it.
//!
//! # Hierarchy
//!
//! ```text
//! Office (optional parent Office)
//!   └── Wing (owning Office required)
//!         └── DEC (owning Wing required)
//! ```
//!
//! Tenders associate with any number of offices, wings and DECs through
//! three independent ID lists. Those lists arrive in several encodings
//! (native arrays, JSON-encoded strings, null) and are normalized by a
//! single deserialization contract, [`IdList`].
//!
//! # Example
//!
//! ```rust
//! use procura_model::{normalize_ids, IdList};
//! use serde_json::json;
//!
//! assert_eq!(normalize_ids(&json!("[1,2,3]")), IdList::from(vec![1, 2, 3]));
//! assert!(normalize_ids(&json!(null)).is_empty());
//! assert!(normalize_ids(&json!("not-json")).is_empty());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod dashboard;
pub mod error;
pub mod hierarchy;
pub mod ids;
pub mod reference;
pub mod session;
pub mod tender;

pub use dashboard::{DashboardStats, StockTransactionStats};
pub use error::{HierarchyViolation, ModelError, ModelResult};
pub use hierarchy::Hierarchy;
pub use ids::{normalize_ids, DecId, DeliveryId, IdList, OfficeId, RawId, TenderId, WingId};
pub use reference::{Dec, EntityKind, Office, ReferenceEntity, Wing};
pub use session::{Role, Session};
pub use tender::{
    Delivery, DeliveryItem, DeliveryStatus, StockTransaction, Tender, TenderStatus,
    TransactionKind,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with procurement records
    pub use crate::{
        normalize_ids, Dec, EntityKind, Hierarchy, IdList, Office, RawId, ReferenceEntity,
        Session, Tender, Wing,
    };
}
