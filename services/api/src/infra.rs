use civic_reports::config::ReportsConfig;
use civic_reports::reports::{InMemoryReportRepository, ReportStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Store for one-shot command-line runs: same seeding and page size as the
/// server, without the simulated latency.
pub(crate) fn command_line_store(
    mut config: ReportsConfig,
) -> ReportStore<InMemoryReportRepository> {
    config.read_latency = Duration::ZERO;
    config.write_latency = Duration::ZERO;
    ReportStore::in_memory(config)
}
