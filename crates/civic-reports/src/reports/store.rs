use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::domain::{CategoryFilter, Report, ReportId, ReportSubmission, ValidationError};
use super::repository::{InMemoryReportRepository, ReportRepository, RepositoryError};
use super::seed::sample_reports;
use crate::config::ReportsConfig;

/// Owns the report sequence and the simulated latency around it.
///
/// Reads sleep first and then take their snapshot, so a create that lands
/// while a list is in flight may or may not show up in that list.
pub struct ReportStore<R> {
    repository: Arc<R>,
    config: ReportsConfig,
}

fn next_report_id() -> ReportId {
    ReportId(format!("rpt_{}", Uuid::new_v4().simple()))
}

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

impl ReportStore<InMemoryReportRepository> {
    /// In-memory store, preloaded with the sample reports when configured.
    pub fn in_memory(config: ReportsConfig) -> Self {
        let repository = if config.seed_samples {
            InMemoryReportRepository::with_reports(sample_reports())
        } else {
            InMemoryReportRepository::default()
        };
        Self::new(Arc::new(repository), config)
    }
}

impl<R> ReportStore<R>
where
    R: ReportRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ReportsConfig) -> Self {
        Self { repository, config }
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    /// Validate a submission and store it as the newest `Pending` report.
    pub async fn create(&self, submission: ReportSubmission) -> Result<Report, ReportStoreError> {
        simulate_latency(self.config.write_latency).await;

        let report = submission.into_report(next_report_id(), Utc::now())?;
        let stored = self.repository.insert_front(report)?;

        info!(
            report_id = %stored.id,
            category = %stored.category,
            "report submitted"
        );
        Ok(stored)
    }

    /// Snapshot of every report, newest first.
    pub async fn list_all(&self) -> Result<Vec<Report>, ReportStoreError> {
        simulate_latency(self.config.read_latency).await;

        let reports = self.repository.snapshot()?;
        debug!(count = reports.len(), "listed reports");
        Ok(reports)
    }

    /// Snapshot restricted to one category; `All` returns the full snapshot.
    pub async fn list_by_category(
        &self,
        filter: CategoryFilter,
    ) -> Result<Vec<Report>, ReportStoreError> {
        simulate_latency(self.config.read_latency).await;

        let mut reports = self.repository.snapshot()?;
        reports.retain(|report| filter.matches(report.category));
        debug!(
            category = filter.label(),
            count = reports.len(),
            "listed reports by category"
        );
        Ok(reports)
    }

    pub async fn get(&self, id: &ReportId) -> Result<Report, ReportStoreError> {
        simulate_latency(self.config.read_latency).await;

        let report = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(report)
    }
}

/// Error raised by the report store.
#[derive(Debug, thiserror::Error)]
pub enum ReportStoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ReportStoreError {
    /// Backend hiccup the caller may surface as "try again".
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ReportStoreError::Repository(RepositoryError::Unavailable(_))
        )
    }
}
