//! Report intake, storage and the listing pipeline.

pub mod domain;
pub mod listing;
pub mod repository;
pub mod router;
mod seed;
pub mod stats;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    Category, CategoryFilter, ImageKind, ImageReference, Report, ReportId, ReportStatus,
    ReportSubmission, StatusFilter, UnknownVariant, ValidationError,
};
pub use listing::{
    run_listing, EmptyState, ListingPage, ListingQuery, SortDirection, SortField, SortOrder,
    DEFAULT_PAGE_SIZE,
};
pub use repository::{InMemoryReportRepository, ReportRepository, RepositoryError};
pub use router::{report_router, ListingParams, ListingResponse};
pub use seed::sample_reports;
pub use stats::ReportStats;
pub use store::{ReportStore, ReportStoreError};
