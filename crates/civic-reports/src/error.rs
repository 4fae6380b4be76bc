use crate::config::ConfigError;
use crate::reports::{RepositoryError, ReportStoreError, UnknownVariant};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use tracing::warn;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Reports(ReportStoreError),
    InvalidFilter(UnknownVariant),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Reports(err) => write!(f, "report error: {}", err),
            AppError::InvalidFilter(err) => write!(f, "invalid filter: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Reports(err) => Some(err),
            AppError::InvalidFilter(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Reports(ReportStoreError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Reports(ReportStoreError::Repository(RepositoryError::Conflict)) => {
                StatusCode::CONFLICT
            }
            AppError::Reports(ReportStoreError::Repository(RepositoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Reports(ReportStoreError::Repository(RepositoryError::Unavailable(_))) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let AppError::Reports(err) = &self {
            if err.is_transient() {
                warn!(error = %err, "report store unavailable");
            }
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ReportStoreError> for AppError {
    fn from(value: ReportStoreError) -> Self {
        Self::Reports(value)
    }
}

impl From<UnknownVariant> for AppError {
    fn from(value: UnknownVariant) -> Self {
        Self::InvalidFilter(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ValidationError;

    #[test]
    fn validation_errors_map_to_unprocessable() {
        let error = AppError::from(ReportStoreError::from(ValidationError::MissingField {
            field: "title",
        }));
        assert_eq!(
            error.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn unavailable_repository_maps_to_service_unavailable() {
        let error = AppError::from(ReportStoreError::from(RepositoryError::Unavailable(
            "offline".to_string(),
        )));
        assert!(error.to_string().contains("offline"));
        assert_eq!(
            error.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn missing_and_duplicate_reports_keep_their_status_codes() {
        let missing = AppError::from(ReportStoreError::from(RepositoryError::NotFound));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let duplicate = AppError::from(ReportStoreError::from(RepositoryError::Conflict));
        assert_eq!(duplicate.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn unknown_filters_are_bad_requests() {
        let error = AppError::from(UnknownVariant {
            kind: "category",
            value: "Graffiti".to_string(),
        });
        assert!(error.to_string().contains("Graffiti"));
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
