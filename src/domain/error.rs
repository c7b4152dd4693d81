use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for serpent operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Game config file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Config lists no resource types to hunt.
    #[error("No resource types configured")]
    NoResourceTypes,

    /// Kubeconfig could not be turned into a usable endpoint.
    #[error("Kubeconfig error: {0}")]
    Kubeconfig(String),

    /// Neither the kubeconfig nor the in-cluster environment worked.
    #[error("No usable cluster credentials (kubeconfig: {kubeconfig}; in-cluster: {in_cluster})")]
    NoClusterCredentials { kubeconfig: String, in_cluster: String },

    /// Transport-level HTTP failure.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Kubernetes API answered with a non-success status.
    #[error("Kubernetes API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Nothing in the cluster matched the configured filters.
    #[error("No eligible resources found")]
    NoEligibleResources,

    /// The resource feed produced nothing before the deadline.
    #[error("Timed out after {0}s waiting for the first resource")]
    ResourceTimeout(u64),

    /// Standard output is not an interactive terminal.
    #[error("serpent needs an interactive terminal")]
    NotATerminal,

    /// Terminal cannot fit the board.
    #[error("Terminal is {cols}x{rows}, serpent needs at least {min_cols}x{min_rows}")]
    TerminalTooSmall { cols: u16, rows: u16, min_cols: u16, min_rows: u16 },

    /// User declined the confirmation prompt.
    #[error("Aborted")]
    Aborted,
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn parse_error(what: impl Into<String>, details: impl ToString) -> Self {
        AppError::ParseError { what: what.into(), details: details.to_string() }
    }

    /// True when the API reported that the object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Api { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_not_found_is_detected() {
        let err = AppError::Api { status: 404, message: "pods \"x\" not found".into() };
        assert!(err.is_not_found());
        assert!(!AppError::Api { status: 500, message: String::new() }.is_not_found());
    }

    #[test]
    fn config_read_names_the_path() {
        let err = AppError::ConfigRead {
            path: PathBuf::from("/tmp/serpent.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/tmp/serpent.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
