use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::analysis::{AnalysisSettings, EcoProfileName, PricingConfig, TextAnalysisMode};

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
    pub analysis: AnalysisSettings,
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
            analysis: load_analysis_settings()?,
        })
    }
}

fn load_analysis_settings() -> Result<AnalysisSettings, ConfigError> {
    let eco_profile = match env::var("APP_ECO_PROFILE") {
        Ok(raw) => EcoProfileName::parse(&raw).ok_or(ConfigError::UnknownEcoProfile(raw))?,
        Err(_) => EcoProfileName::default(),
    };

    let text_analysis = match env::var("APP_TEXT_ANALYSIS") {
        Ok(raw) => TextAnalysisMode::parse(&raw).ok_or(ConfigError::UnknownTextAnalysis(raw))?,
        Err(_) => TextAnalysisMode::default(),
    };

    let defaults = PricingConfig::default();
    let pricing = PricingConfig::new(
        number_var("APP_PRICE_MARGIN")?.unwrap_or(defaults.margin),
        number_var("APP_DEFAULT_PRICE")?.unwrap_or(defaults.default_price),
        number_var("APP_LABOR_RATE")?.unwrap_or(defaults.labor_rate),
    );

    Ok(AnalysisSettings {
        eco_profile,
        text_analysis,
        pricing,
    })
}

fn number_var(var: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var }),
        Err(_) => Ok(None),
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    UnknownEcoProfile(String),
    UnknownTextAnalysis(String),
    InvalidNumber { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::UnknownEcoProfile(value) => write!(
                f,
                "APP_ECO_PROFILE '{value}' is not one of balanced-v2, classic-v1"
            ),
            ConfigError::UnknownTextAnalysis(value) => write!(
                f,
                "APP_TEXT_ANALYSIS '{value}' is not one of basic, enhanced"
            ),
            ConfigError::InvalidNumber { var } => write!(f, "{var} must be a number"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
