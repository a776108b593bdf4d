//! AWS provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("App Runner connection not found: {0}. Create it in the App Runner console before deploying")]
    ConnectionNotFound(String),

    #[error("Connection lookup failed: {0}")]
    Resolution(#[source] runway_cloud::CloudError),

    #[error("Configuration error: {0}")]
    Config(#[from] runway_config::ConfigError),

    #[error("Cloud error: {0}")]
    Cloud(runway_cloud::CloudError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<runway_cloud::CloudError> for AwsError {
    fn from(err: runway_cloud::CloudError) -> Self {
        match err {
            runway_cloud::CloudError::ConnectionNotFound(name) => AwsError::ConnectionNotFound(name),
            e @ runway_cloud::CloudError::Resolution { .. } => AwsError::Resolution(e),
            e => AwsError::Cloud(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, AwsError>;
