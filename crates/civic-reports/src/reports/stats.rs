use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{Category, Report, ReportStatus};

/// Headline counts for a set of reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub by_category: BTreeMap<Category, usize>,
}

impl ReportStats {
    pub fn from_reports(reports: &[Report]) -> Self {
        let mut by_category: BTreeMap<Category, usize> =
            Category::ALL.iter().map(|category| (*category, 0)).collect();
        let mut stats = Self {
            total: reports.len(),
            pending: 0,
            in_progress: 0,
            resolved: 0,
            by_category: BTreeMap::new(),
        };

        for report in reports {
            match report.status {
                ReportStatus::Pending => stats.pending += 1,
                ReportStatus::InProgress => stats.in_progress += 1,
                ReportStatus::Resolved => stats.resolved += 1,
            }
            *by_category.entry(report.category).or_default() += 1;
        }

        stats.by_category = by_category;
        stats
    }

    pub fn count_for(&self, status: ReportStatus) -> usize {
        match status {
            ReportStatus::Pending => self.pending,
            ReportStatus::InProgress => self.in_progress,
            ReportStatus::Resolved => self.resolved,
        }
    }
}
