use chrono::NaiveDate;
use thiserror::Error;
use tracing::error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// The requested window ends before it starts
    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// The prediction dataset cannot be read or parsed
    #[error("Forecast data unavailable: {0}")]
    DataUnavailable(String),

    /// The request was valid but no prediction falls inside the window
    #[error("No forecast data between {start} and {end}")]
    EmptyResult { start: NaiveDate, end: NaiveDate },

    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    DataFrame(String),

    /// Runtime error for unexpected situations
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl ComputeError {
    /// Stable machine-readable code used in API error responses.
    pub fn code(&self) -> &'static str {
        match self {
            ComputeError::InvalidRange { .. } => "INVALID_RANGE",
            ComputeError::DataUnavailable(_) => "DATA_UNAVAILABLE",
            ComputeError::EmptyResult { .. } => "EMPTY_RESULT",
            ComputeError::DataFrame(_) => "DATAFRAME_ERROR",
            ComputeError::Runtime(_) => "RUNTIME_ERROR",
        }
    }

    /// Errors the user can fix by choosing another range.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ComputeError::InvalidRange { .. } | ComputeError::EmptyResult { .. }
        )
    }
}

// Reading and parsing failures mean the dataset is unusable; everything else
// is a frame manipulation bug.
impl From<polars::error::PolarsError> for ComputeError {
    fn from(error: polars::error::PolarsError) -> Self {
        match error {
            polars::error::PolarsError::IO { .. } => {
                let err = ComputeError::DataUnavailable(format!("I/O error: {}", error));
                error!(?err, "Forecast source I/O error");
                err
            }
            polars::error::PolarsError::NoData(_) => {
                let err = ComputeError::DataUnavailable(format!("No data: {}", error));
                error!(?err, "Forecast source is empty");
                err
            }
            polars::error::PolarsError::ComputeError(_)
            | polars::error::PolarsError::SchemaMismatch(_) => {
                let err = ComputeError::DataUnavailable(format!("Malformed dataset: {}", error));
                error!(?err, "Forecast source could not be parsed");
                err
            }
            polars::error::PolarsError::ColumnNotFound(_) => {
                let err = ComputeError::DataUnavailable(format!("Missing column: {}", error));
                error!(?err, "Forecast source is missing a column");
                err
            }
            _ => {
                let err = ComputeError::DataFrame(format!("{}", error));
                error!(?err, "DataFrame error");
                err
            }
        }
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let invalid = ComputeError::InvalidRange { start, end };
        assert_eq!(invalid.code(), "INVALID_RANGE");
        assert!(invalid.is_recoverable());
        assert!(invalid.to_string().contains("2024-01-01"));

        let empty = ComputeError::EmptyResult { start: end, end: start };
        assert_eq!(empty.code(), "EMPTY_RESULT");
        assert!(empty.is_recoverable());

        let unavailable = ComputeError::DataUnavailable("missing file".to_string());
        assert_eq!(unavailable.code(), "DATA_UNAVAILABLE");
        assert!(!unavailable.is_recoverable());
    }
}
