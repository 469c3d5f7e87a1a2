//! One error enum covering configuration and reporting.

use std::path::PathBuf;

use super::error_code::{self, DepwatchErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum DepwatchError {
    // Reporting
    #[error("Cannot write deprecation report to {}: {source}", .path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config
    #[error("Invalid deprecation mode '{0}': expected \"weak\", \"strict\" or a number")]
    InvalidMode(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // TOML
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl DepwatchErrorCode for DepwatchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ReportWrite { .. } => error_code::REPORT_WRITE_FAILED,
            Self::Io(_) => error_code::IO_ERROR,
            Self::InvalidMode(_) => error_code::INVALID_MODE,
            Self::ConfigError(_) => error_code::CONFIG_ERROR,
            Self::TomlParse(_) => error_code::CONFIG_PARSE_ERROR,
        }
    }
}

pub type DepwatchResult<T> = Result<T, DepwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_write_names_the_path() {
        let err = DepwatchError::ReportWrite {
            path: PathBuf::from("/nope/report.xml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.error_code(), "REPORT_WRITE_FAILED");
        assert!(err.to_string().contains("/nope/report.xml"));
    }

    #[test]
    fn invalid_mode_code() {
        let err = DepwatchError::InvalidMode("loud".to_string());
        assert_eq!(err.error_code(), "INVALID_MODE");
        assert!(err.to_string().contains("loud"));
    }
}
