//! Connection lookup by name

use crate::error::{CloudError, Result};
use crate::provider::ControlPlane;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default upper bound for a single control-plane lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);

/// Opaque identifier of an existing connection resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionIdentifier(String);

impl ConnectionIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConnectionIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves connection names to identifiers with a single bounded query
///
/// There is no retry: any failure is terminal for the run.
pub struct ConnectionResolver<P> {
    control_plane: P,
    timeout: Duration,
}

impl<P: ControlPlane> ConnectionResolver<P> {
    pub fn new(control_plane: P) -> Self {
        Self {
            control_plane,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn control_plane(&self) -> &P {
        &self.control_plane
    }

    /// Returns the identifier of the first connection named `connection_name`
    ///
    /// When several connections share the name, the first one returned by the
    /// control plane wins.
    pub async fn resolve(&self, connection_name: &str) -> Result<ConnectionIdentifier> {
        tracing::debug!(
            "Looking up connection {} via {}",
            connection_name,
            self.control_plane.name()
        );

        let listing = tokio::time::timeout(
            self.timeout,
            self.control_plane.list_connections(connection_name),
        )
        .await
        .map_err(|_| {
            CloudError::resolution(
                connection_name,
                CloudError::Timeout(format!("no response within {:?}", self.timeout)),
            )
        })?
        .map_err(|e| CloudError::resolution(connection_name, e))?;

        if listing.len() > 1 {
            tracing::warn!(
                "{} connections named {}, using the first",
                listing.len(),
                connection_name
            );
        }

        let first = listing
            .into_iter()
            .next()
            .ok_or_else(|| CloudError::ConnectionNotFound(connection_name.to_string()))?;

        tracing::info!("Resolved connection {} -> {}", connection_name, first.connection_arn);
        Ok(ConnectionIdentifier::new(first.connection_arn))
    }
}
