//! End-to-end stack pipeline
//!
//! validate → resolve connection → assemble → synthesize. Every step runs
//! once, in order, and the first failure aborts the run.

use crate::assembler;
use crate::error::Result;
use crate::synth::{CloudFormationSynthesizer, Template};
use runway_cloud::{ConnectionIdentifier, ConnectionResolver, ControlPlane, ResourceGraph, Synthesizer};
use runway_config::{DeploymentParameters, RawParameters};

/// Default stack identity
pub const DEFAULT_STACK_NAME: &str = "AppRunnerStack";

/// Output of a successful run
#[derive(Debug, Clone)]
pub struct SynthesizedStack {
    pub connection: ConnectionIdentifier,
    pub graph: ResourceGraph,
    pub template: Template,
}

pub struct StackPipeline<P> {
    resolver: ConnectionResolver<P>,
    synthesizer: CloudFormationSynthesizer,
}

impl<P: ControlPlane> StackPipeline<P> {
    pub fn new(resolver: ConnectionResolver<P>) -> Self {
        Self {
            resolver,
            synthesizer: CloudFormationSynthesizer::new(),
        }
    }

    pub fn with_synthesizer(mut self, synthesizer: CloudFormationSynthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    pub fn resolver(&self) -> &ConnectionResolver<P> {
        &self.resolver
    }

    /// Validates raw input first; the control plane is not contacted when
    /// validation fails
    pub async fn run_raw(&self, raw: RawParameters, stack_name: &str) -> Result<SynthesizedStack> {
        let (params, _environment) = raw.validate()?;
        self.run(&params, stack_name).await
    }

    /// Runs the pipeline for already validated parameters
    ///
    /// The stack name is checked before the control plane is contacted.
    pub async fn run(
        &self,
        params: &DeploymentParameters,
        stack_name: &str,
    ) -> Result<SynthesizedStack> {
        runway_config::validate_stack_name(stack_name)?;

        let connection = self
            .resolver
            .resolve(&params.source.connection_name)
            .await?;

        let graph = assembler::assemble(params, &connection, stack_name)?;
        let template = self.synthesizer.synthesize(&graph)?;

        Ok(SynthesizedStack {
            connection,
            graph,
            template,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::SERVICE_LOGICAL_ID;
    use crate::error::AwsError;
    use async_trait::async_trait;
    use runway_cloud::{CloudError, ConnectionSummary};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Directory {
        records: Vec<ConnectionSummary>,
        calls: AtomicUsize,
    }

    impl Directory {
        fn new(records: Vec<ConnectionSummary>) -> Self {
            Self {
                records,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ControlPlane for Directory {
        fn name(&self) -> &str {
            "memory"
        }

        async fn list_connections(
            &self,
            connection_name: &str,
        ) -> runway_cloud::Result<Vec<ConnectionSummary>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .records
                .iter()
                .filter(|r| r.connection_name == connection_name)
                .cloned()
                .collect())
        }
    }

    struct Unreachable;

    #[async_trait]
    impl ControlPlane for Unreachable {
        fn name(&self) -> &str {
            "unreachable"
        }

        async fn list_connections(&self, _: &str) -> runway_cloud::Result<Vec<ConnectionSummary>> {
            Err(CloudError::ApiError("dispatch failure".to_string()))
        }
    }

    fn raw(connection_name: &str) -> RawParameters {
        runway_config::parse(&format!(
            r#"
source:
  repository_url: https://example.com/r.git
  branch: main
  build_command: make
  start_command: ./app
  port: 8080
  connection_name: {connection_name}
instance:
  cpu: 1 vCPU
  memory: 2 GB
auto_scaling:
  max_concurrency: 100
  min_size: 1
  max_size: 3
"#
        ))
        .unwrap()
    }

    fn pipeline(records: Vec<ConnectionSummary>) -> StackPipeline<Directory> {
        StackPipeline::new(ConnectionResolver::new(Directory::new(records)))
    }

    #[tokio::test]
    async fn test_full_run_references_resolved_connection() {
        let pipeline = pipeline(vec![ConnectionSummary::new("conn-a", "arn:conn-a-1")]);

        let stack = pipeline.run_raw(raw("conn-a"), DEFAULT_STACK_NAME).await.unwrap();

        assert_eq!(stack.connection.as_str(), "arn:conn-a-1");
        let service = stack.template.resource(SERVICE_LOGICAL_ID).unwrap();
        let properties = &service["Properties"];
        assert_eq!(
            properties["SourceConfiguration"]["AuthenticationConfiguration"]["ConnectionArn"],
            "arn:conn-a-1"
        );
        assert_eq!(
            properties["SourceConfiguration"]["CodeRepository"]["CodeConfiguration"]
                ["CodeConfigurationValues"]["Port"],
            "8080"
        );
        assert_eq!(properties["HealthCheckConfiguration"]["Path"], "/");
        assert_eq!(
            properties["AutoScalingConfigurationArn"],
            json!({ "Fn::GetAtt": [
                "AutoScalingConfiguration",
                "AutoScalingConfiguration.AutoScalingConfigurationArn"
            ] })
        );
        assert_eq!(stack.graph.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_connection_aborts_without_graph() {
        let pipeline = pipeline(vec![ConnectionSummary::new("conn-a", "arn:conn-a-1")]);

        let result = pipeline.run_raw(raw("conn-missing"), DEFAULT_STACK_NAME).await;

        match result {
            Err(AwsError::ConnectionNotFound(name)) => assert_eq!(name, "conn-missing"),
            other => panic!("Expected ConnectionNotFound, got {:?}", other.map(|s| s.graph)),
        }
    }

    #[tokio::test]
    async fn test_invalid_bounds_rejected_before_lookup() {
        let pipeline = pipeline(vec![ConnectionSummary::new("conn-a", "arn:conn-a-1")]);
        let mut raw = raw("conn-a");
        raw.auto_scaling.min_size = Some(5);
        raw.auto_scaling.max_size = Some(2);

        let result = pipeline.run_raw(raw, DEFAULT_STACK_NAME).await;

        assert!(matches!(
            result,
            Err(AwsError::Config(runway_config::ConfigError::InvalidBounds { .. }))
        ));
        assert_eq!(pipeline.resolver().control_plane().calls(), 0);
    }

    #[tokio::test]
    async fn test_control_plane_failure_is_resolution_error() {
        let pipeline = StackPipeline::new(ConnectionResolver::new(Unreachable));

        let result = pipeline.run_raw(raw("conn-a"), DEFAULT_STACK_NAME).await;

        assert!(matches!(result, Err(AwsError::Resolution(_))));
    }

    #[tokio::test]
    async fn test_invalid_stack_name_rejected_before_lookup() {
        let pipeline = pipeline(vec![ConnectionSummary::new("conn-a", "arn:conn-a-1")]);
        let overlong = format!("Stack{}", "x".repeat(runway_config::params::STACK_NAME_MAX_LEN));

        for name in ["", "../x", "../escaped", overlong.as_str()] {
            let result = pipeline.run_raw(raw("conn-a"), name).await;
            assert!(
                matches!(
                    result,
                    Err(AwsError::Config(runway_config::ConfigError::InvalidField {
                        field: "stack_name",
                        ..
                    }))
                ),
                "accepted stack name {:?}",
                name
            );
        }
        assert_eq!(pipeline.resolver().control_plane().calls(), 0);
    }

    #[tokio::test]
    async fn test_custom_synthesizer_is_used() {
        let pipeline = pipeline(vec![ConnectionSummary::new("conn-a", "arn:conn-a-1")])
            .with_synthesizer(CloudFormationSynthesizer::new().with_description("web service"));

        let stack = pipeline.run_raw(raw("conn-a"), "WebStack").await.unwrap();

        assert_eq!(stack.template.stack_name, "WebStack");
        assert_eq!(stack.template.body["Description"], "web service");
    }
}
