//! Procura CLI
//!
//! Configuration, fixtures and report rendering behind the `procura`
//! binary. Rendering functions are pure so reports can be checked
//! without a backend.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod args;
pub mod config;
pub mod fixture;
pub mod report;

pub use args::{command, session_from};
pub use config::{ConfigError, ProcuraConfig};
pub use fixture::Fixture;
pub use report::{render_hierarchy, render_stats, render_tenders, tender_rows, TenderRow};
