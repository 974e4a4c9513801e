//! Procura Resolver
//!
//! Turns opaque office/wing/DEC references into display labels.
//!
//! # Core Operations
//!
//! - **Resolve**: map ID references to names, synthesizing `"<Kind>-<id>"`
//!   for anything the reference lists do not contain
//! - **Summarize**: compact one-line summary of a name list
//! - **Tooltip**: `"<name> (ID: <id>)"` pairs for hover text
//!
//! Nothing here fails: stale or missing references degrade to placeholder
//! labels and malformed association fields to empty lists.
//!
//! # Example
//!
//! ```rust
//! use procura_model::{EntityKind, IdList, Office};
//! use procura_resolver::{format_names_for_display, NameResolver};
//!
//! let resolver = NameResolver::new(&[Office::new(1, "Head Office")], &[], &[]);
//! let names = resolver.resolve(EntityKind::Office, &IdList::from(vec![1, 7]));
//! assert_eq!(names, vec!["Head Office", "Office-7"]);
//! assert_eq!(format_names_for_display(&names, EntityKind::Office), "Head Office, Office-7");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod format;
pub mod resolver;
pub mod tender;

pub use format::{format_names_for_display, format_names_with_ids, SUMMARY_LIMIT};
pub use resolver::NameResolver;
pub use tender::{AssociationLabels, TenderLabels};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
