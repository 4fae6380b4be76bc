use std::sync::{Arc, Mutex};

use super::domain::{Report, ReportId};

/// Storage abstraction so the store can be exercised against failing backends.
pub trait ReportRepository: Send + Sync {
    /// Places a record at the front of the sequence.
    fn insert_front(&self, report: Report) -> Result<Report, RepositoryError>;
    /// Point-in-time copy of every record, newest first.
    fn snapshot(&self) -> Result<Vec<Report>, RepositoryError>;
    fn fetch(&self, id: &ReportId) -> Result<Option<Report>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("report already exists")]
    Conflict,
    #[error("report not found")]
    NotFound,
    #[error("report repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-lifetime storage backed by a vector; index 0 is the newest report.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReportRepository {
    records: Arc<Mutex<Vec<Report>>>,
}

impl InMemoryReportRepository {
    /// Starts from an existing sequence, kept in the given order.
    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            records: Arc::new(Mutex::new(reports)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Report>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("report mutex poisoned".to_string()))
    }
}

impl ReportRepository for InMemoryReportRepository {
    fn insert_front(&self, report: Report) -> Result<Report, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id == report.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(0, report.clone());
        Ok(report)
    }

    fn snapshot(&self) -> Result<Vec<Report>, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    fn fetch(&self, id: &ReportId) -> Result<Option<Report>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|report| &report.id == id).cloned())
    }
}
