use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::reports::DEFAULT_PAGE_SIZE;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub reports: ReportsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            reports: ReportsConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Store behavior: simulated latency, listing page size and sample seeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportsConfig {
    pub read_latency: Duration,
    pub write_latency: Duration,
    pub page_size: usize,
    pub seed_samples: bool,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            read_latency: Duration::from_millis(800),
            write_latency: Duration::from_millis(1000),
            page_size: DEFAULT_PAGE_SIZE,
            seed_samples: true,
        }
    }
}

impl ReportsConfig {
    /// No simulated latency; handy for tests and CLI runs.
    pub fn immediate() -> Self {
        Self {
            read_latency: Duration::ZERO,
            write_latency: Duration::ZERO,
            ..Self::default()
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let read_latency = latency_from_env("REPORTS_READ_LATENCY_MS", defaults.read_latency)?;
        let write_latency = latency_from_env("REPORTS_WRITE_LATENCY_MS", defaults.write_latency)?;

        let page_size = match env::var("REPORTS_PAGE_SIZE") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::InvalidPageSize),
            },
            Err(_) => defaults.page_size,
        };

        let seed_samples = match env::var("REPORTS_SEED_SAMPLES") {
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        variable: "REPORTS_SEED_SAMPLES",
                    })
                }
            },
            Err(_) => defaults.seed_samples,
        };

        Ok(Self {
            read_latency,
            write_latency,
            page_size,
            seed_samples,
        })
    }
}

fn latency_from_env(variable: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidLatency { variable }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLatency { variable: &'static str },
    InvalidPageSize,
    InvalidFlag { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLatency { variable } => {
                write!(f, "{variable} must be a whole number of milliseconds")
            }
            ConfigError::InvalidPageSize => {
                write!(f, "REPORTS_PAGE_SIZE must be a positive integer")
            }
            ConfigError::InvalidFlag { variable } => {
                write!(f, "{variable} must be true or false")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidLatency { .. }
            | ConfigError::InvalidPageSize
            | ConfigError::InvalidFlag { .. } => None,
        }
    }
}
