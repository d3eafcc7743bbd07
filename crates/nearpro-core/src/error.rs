use rust_decimal::Decimal;
use thiserror::Error;

/// Rejection of caller-supplied search or profile input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),

    #[error("radius {radius}m is below the minimum of {min}m")]
    RadiusTooSmall { radius: u32, min: u32 },

    #[error("minimum rating {0} is outside [0, 5]")]
    InvalidMinRating(f64),

    #[error("maximum price {0} must not be negative")]
    NegativeMaxPrice(Decimal),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("parameter `{field}` has malformed value \"{value}\"")]
    Malformed { field: &'static str, value: String },
}

/// Failure reading from the professional directory.
///
/// Carries the underlying storage error when there is one so callers can log
/// it, but never exposes it to end users.
#[derive(Debug, Error)]
#[error("directory query failed: {message}")]
pub struct DataAccessError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DataAccessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read seed file {path}: {source}")]
    SeedFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file: {0}")]
    SeedFileParse(#[from] serde_yaml::Error),

    #[error("seed validation failed: {0}")]
    Validation(String),
}
