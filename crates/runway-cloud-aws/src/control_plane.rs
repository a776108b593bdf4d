//! App Runner control-plane client
//!
//! Live implementation of [`ControlPlane`] backed by the AWS SDK. Credentials
//! come from the SDK default chain.

use async_trait::async_trait;
use aws_sdk_apprunner::config::Region;
use aws_sdk_apprunner::error::DisplayErrorContext;
use runway_cloud::{CloudError, ConnectionSummary, ControlPlane};

/// App Runner API client scoped to one region
pub struct AppRunnerControlPlane {
    client: aws_sdk_apprunner::Client,
    region: Option<String>,
}

impl AppRunnerControlPlane {
    /// Builds a client from the default credential chain
    ///
    /// `region` overrides the SDK's region resolution; `None` keeps whatever
    /// the environment/profile provides.
    pub async fn connect(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;

        let region = sdk_config.region().map(|r| r.to_string());
        tracing::debug!(
            "App Runner client ready (region: {})",
            region.as_deref().unwrap_or("unresolved")
        );

        Self {
            client: aws_sdk_apprunner::Client::new(&sdk_config),
            region,
        }
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

#[async_trait]
impl ControlPlane for AppRunnerControlPlane {
    fn name(&self) -> &str {
        "aws-apprunner"
    }

    /// Issues one `ListConnections` call. Only the first page is read, which is
    /// all a first-match lookup needs.
    async fn list_connections(
        &self,
        connection_name: &str,
    ) -> runway_cloud::Result<Vec<ConnectionSummary>> {
        let output = self
            .client
            .list_connections()
            .connection_name(connection_name)
            .send()
            .await
            .map_err(|e| CloudError::ApiError(DisplayErrorContext(&e).to_string()))?;

        let summaries = output
            .connection_summary_list()
            .iter()
            .filter_map(|summary| {
                let arn = summary.connection_arn()?;
                Some(ConnectionSummary {
                    connection_name: summary
                        .connection_name()
                        .unwrap_or(connection_name)
                        .to_string(),
                    connection_arn: arn.to_string(),
                    provider_type: summary.provider_type().map(|p| p.as_str().to_string()),
                    status: summary.status().map(|s| s.as_str().to_string()),
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            "ListConnections({}) returned {} record(s)",
            connection_name,
            summaries.len()
        );
        Ok(summaries)
    }
}
