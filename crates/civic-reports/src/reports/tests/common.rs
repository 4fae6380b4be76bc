use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::config::ReportsConfig;
use crate::reports::domain::{Category, Report, ReportId, ReportSubmission};
use crate::reports::repository::{InMemoryReportRepository, ReportRepository, RepositoryError};
use crate::reports::{report_router, ReportStore};

pub(super) fn submission() -> ReportSubmission {
    ReportSubmission {
        title: "Test".to_string(),
        description: "Test description".to_string(),
        category: Category::Pothole,
        image_url: None,
        latitude: 40.7128,
        longitude: -74.0060,
    }
}

pub(super) fn unseeded_config() -> ReportsConfig {
    ReportsConfig {
        seed_samples: false,
        ..ReportsConfig::immediate()
    }
}

pub(super) fn build_store() -> (
    ReportStore<InMemoryReportRepository>,
    Arc<InMemoryReportRepository>,
) {
    let repository = Arc::new(InMemoryReportRepository::with_reports(
        crate::reports::sample_reports(),
    ));
    let store = ReportStore::new(repository.clone(), ReportsConfig::immediate());
    (store, repository)
}

pub(super) fn router_with_store(store: ReportStore<InMemoryReportRepository>) -> axum::Router {
    report_router(Arc::new(store))
}

pub(super) fn ids(reports: &[Report]) -> Vec<String> {
    reports.iter().map(|report| report.id.0.clone()).collect()
}

pub(super) struct ConflictRepository;

impl ReportRepository for ConflictRepository {
    fn insert_front(&self, _report: Report) -> Result<Report, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn snapshot(&self) -> Result<Vec<Report>, RepositoryError> {
        Ok(Vec::new())
    }

    fn fetch(&self, _id: &ReportId) -> Result<Option<Report>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableRepository;

impl ReportRepository for UnavailableRepository {
    fn insert_front(&self, _report: Report) -> Result<Report, RepositoryError> {
        Err(RepositoryError::Unavailable("network unreachable".to_string()))
    }

    fn snapshot(&self) -> Result<Vec<Report>, RepositoryError> {
        Err(RepositoryError::Unavailable("network unreachable".to_string()))
    }

    fn fetch(&self, _id: &ReportId) -> Result<Option<Report>, RepositoryError> {
        Err(RepositoryError::Unavailable("network unreachable".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
