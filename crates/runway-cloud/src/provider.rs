//! Control-plane and synthesizer seams

use crate::error::Result;
use crate::graph::ResourceGraph;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Read access to a provider's control plane
///
/// Implemented by the live SDK client and by in-memory directories in tests.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Returns the provider name (e.g., "aws")
    fn name(&self) -> &str;

    /// Lists connections whose name matches `connection_name`, in the order
    /// the control plane returned them
    async fn list_connections(&self, connection_name: &str) -> Result<Vec<ConnectionSummary>>;
}

/// One record of a connection listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSummary {
    pub connection_name: String,

    /// Provider-issued identifier
    pub connection_arn: String,

    /// Source-code host (e.g., "GITHUB")
    pub provider_type: Option<String>,

    /// Handshake status (e.g., "AVAILABLE", "PENDING_HANDSHAKE")
    pub status: Option<String>,
}

impl ConnectionSummary {
    pub fn new(connection_name: impl Into<String>, connection_arn: impl Into<String>) -> Self {
        Self {
            connection_name: connection_name.into(),
            connection_arn: connection_arn.into(),
            provider_type: None,
            status: None,
        }
    }
}

/// Turns a resource graph into a declarative template
pub trait Synthesizer {
    type Output;

    fn synthesize(&self, graph: &ResourceGraph) -> Result<Self::Output>;
}
