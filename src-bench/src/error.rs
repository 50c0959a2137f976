//! Error types for problem sweeps.

use mixint_de::DEError;
use mixint_env::EnvError;
use thiserror::Error;

/// Errors that can occur while configuring or running a sweep.
#[derive(Debug, Error)]
pub enum BenchError {
    /// The engine rejected a problem or its configuration.
    #[error("engine error: {0}")]
    Engine(#[from] DEError),

    /// Reading a configuration file or writing a report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing a space separated report failed.
    #[error("report error: {0}")]
    Csv(#[from] csv::Error),

    /// The configuration file is not valid JSON for a sweep.
    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),

    /// The output directory could not be resolved.
    #[error(transparent)]
    Env(#[from] EnvError),

    /// A sweep axis or parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An encoding label that does not name any encoding.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),
}

/// A specialized `Result` type for sweep operations.
pub type Result<T> = std::result::Result<T, BenchError>;

impl BenchError {
    /// Returns `true` if the error comes from user supplied configuration.
    pub fn is_config_error(&self) -> bool {
        match self {
            BenchError::InvalidConfig(_) | BenchError::UnknownEncoding(_) | BenchError::Json(_) => {
                true
            }
            BenchError::Engine(e) => e.is_config_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let err: BenchError = DEError::PopulationTooSmall { pop_size: 2 }.into();
        assert!(err.is_config_error());
        assert_eq!(err.to_string(), "engine error: population size (2) must be >= 4");

        let err: BenchError = std::io::Error::other("disk full").into();
        assert!(!err.is_config_error());

        let err = BenchError::UnknownEncoding("U3".into());
        assert_eq!(err.to_string(), "unknown encoding: U3");
        assert!(err.is_config_error());
    }
}
