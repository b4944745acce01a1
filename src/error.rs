//! Error types for health-metrics

use thiserror::Error;

/// Main error type for the health-metrics pipeline
#[derive(Error, Debug)]
pub enum HealthMetricsError {
    #[error("Malformed amount for {entity} in {period}: '{raw}'")]
    MalformedAmount {
        entity: String,
        period: String,
        raw: String,
    },

    #[error("No exchange rate for currency: {0}")]
    UnknownCurrency(crate::currency::Currency),

    #[error("Unknown currency code: {0}")]
    UnknownCurrencyCode(String),

    #[error("Exchange rate must be positive, got {rate} for {currency}")]
    InvalidRate {
        currency: crate::currency::Currency,
        rate: f64,
    },

    #[error("Empty dataset: no records to rank")]
    EmptyDataset,

    #[error("Entity '{entity}' not found in period {period}")]
    EntityNotFound { entity: String, period: String },

    #[error("Data error: {0}")]
    DataError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type alias for health-metrics operations
pub type Result<T> = std::result::Result<T, HealthMetricsError>;
