//! Procura Store
//!
//! Data access over a hosted relational backend reached through named
//! queries and remote procedures.
//!
//! # Architecture
//!
//! ```text
//! ReferenceView ← ViewHandle ← ReferenceDataLoader ─┐
//!                                   (moka cache,     │
//!                                    last-known-good)│
//! Tender/Delivery/DashboardRepository ───────────────┤
//!                                                    ↓
//!                                   QueryExecutor (HttpExecutor | InMemoryExecutor)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use procura_store::{HttpConfig, HttpExecutor, LoaderConfig, ReferenceDataLoader};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = Arc::new(HttpExecutor::new(&HttpConfig::new("https://procura.example"))?);
//! let loader = ReferenceDataLoader::new(executor, LoaderConfig::default());
//!
//! let snapshot = loader.hierarchy().await;
//! println!("{} violations", snapshot.hierarchy.validate().len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod loader;
pub mod memory;
pub mod notify;
pub mod repository;
pub mod view;

pub use config::{HttpConfig, LoaderConfig};
pub use error::{StoreError, StoreResult};
pub use executor::{decode_one, decode_rows, encode_param, QueryExecutor, QueryParams};
pub use http::HttpExecutor;
pub use loader::{HierarchySnapshot, Loaded, ReferenceDataLoader};
pub use memory::InMemoryExecutor;
pub use notify::{ChannelNotifier, Notification, NotificationLevel, Notifier, TracingNotifier};
pub use repository::{DashboardRepository, DeliveryRepository, TenderRepository};
pub use view::{ReferenceView, ViewHandle, ViewState};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
