use crate::config::TelemetryConfig;
use tracing_subscriber::filter::{LevelFilter, ParseError};
use tracing_subscriber::EnvFilter;

/// Targets that follow `APP_LOG_LEVEL`; everything else logs at
/// [`DEPENDENCY_LEVEL`].
const REPORT_TARGETS: [&str; 2] = ["civic_reports", "civic_reports_api"];
const DEPENDENCY_LEVEL: &str = "warn";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log level '{value}'")]
    InvalidLevel { value: String },
    #[error("invalid log filter '{value}'")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("unable to install subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => fallback_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

fn fallback_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    let directives = fallback_directives(log_level)?;
    EnvFilter::try_new(&directives).map_err(|source| TelemetryError::EnvFilter {
        value: directives,
        source,
    })
}

/// A bare level (`debug`) applies to the report crates only. Anything that
/// already looks like a filter (`tower_http=debug,info`) is used verbatim.
fn fallback_directives(log_level: &str) -> Result<String, TelemetryError> {
    let log_level = log_level.trim();
    if log_level.contains('=') || log_level.contains(',') {
        return Ok(log_level.to_string());
    }

    let level = if log_level.is_empty() { "info" } else { log_level };
    if level.parse::<LevelFilter>().is_err() {
        return Err(TelemetryError::InvalidLevel {
            value: level.to_string(),
        });
    }

    let directives = std::iter::once(DEPENDENCY_LEVEL.to_string())
        .chain(
            REPORT_TARGETS
                .iter()
                .map(|target| format!("{target}={level}")),
        )
        .collect::<Vec<_>>();
    Ok(directives.join(","))
}
