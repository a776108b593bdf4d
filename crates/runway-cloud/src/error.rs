//! Cloud error types

use thiserror::Error;

/// Errors raised by the resource graph and control-plane lookups
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Failed to resolve connection '{name}': {source}")]
    Resolution {
        name: String,
        #[source]
        source: Box<CloudError>,
    },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Resource already exists in graph: {0}")]
    DuplicateResource(String),

    #[error("Resource '{from}' references unknown resource '{to}'")]
    DanglingReference { from: String, to: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// Wraps a control-plane failure for the named connection
    pub fn resolution(name: impl Into<String>, source: CloudError) -> Self {
        CloudError::Resolution {
            name: name.into(),
            source: Box::new(source),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CloudError::ConnectionNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
