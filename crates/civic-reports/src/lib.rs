//! Civic issue reporting core: an in-memory report store and the listing
//! pipeline that turns store snapshots into pages of results.

pub mod config;
pub mod error;
pub mod reports;
pub mod telemetry;
