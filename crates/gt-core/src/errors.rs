use thiserror::Error;

/// Main error type for GeoTune operations.
///
/// Every variant is a fatal pre-run condition: per-trial failures
/// (timeouts, unparseable output, the evaluated program's own failure
/// sentinel) are trial statuses, not errors, and never surface here.
#[derive(Error, Debug)]
pub enum TuneError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid metric pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for GeoTune operations.
pub type TuneResult<T> = Result<T, TuneError>;

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::TuneError::Config(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = TuneError::Config("search space is empty".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("search space is empty"));
    }

    #[test]
    fn test_config_error_macro() {
        let err = config_error!("no values for parameter '{}'", "ratio");
        match err {
            TuneError::Config(msg) => assert!(msg.contains("ratio")),
            _ => panic!("Expected Config error"),
        }
    }
}
