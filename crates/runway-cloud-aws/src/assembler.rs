//! App Runner stack assembly
//!
//! Builds the two-node graph for one App Runner service: an autoscaling
//! configuration created through a custom SDK call, and the service itself
//! pointing at the configuration's ARN.

use runway_cloud::{
    ConnectionIdentifier, Lifecycle, LifecycleEvent, Property, ResourceGraph, ResourceNode,
    Result, SdkCall,
};
use runway_config::DeploymentParameters;

pub const AUTO_SCALING_LOGICAL_ID: &str = "AutoScalingConfiguration";
pub const SERVICE_LOGICAL_ID: &str = "AppRunnerService";

pub const CUSTOM_SDK_RESOURCE_TYPE: &str = "Custom::AWS";
pub const SERVICE_RESOURCE_TYPE: &str = "AWS::AppRunner::Service";

/// Response field of `createAutoScalingConfiguration` holding the new ARN
pub const AUTO_SCALING_ARN_FIELD: &str = "AutoScalingConfiguration.AutoScalingConfigurationArn";

const RUNTIME: &str = "GO_1";
const HEALTH_CHECK_PATH: &str = "/";
const HEALTH_CHECK_PROTOCOL: &str = "HTTP";
const RUNTIME_ENVIRONMENT: [(&str, &str); 1] = [("ENV1", "Test")];

/// Assembles the resource graph for `stack_name`
///
/// Pure: the same inputs always give an equal graph. The node ids are fixed
/// and the only reference points backwards, so validated input never fails.
pub fn assemble(
    params: &DeploymentParameters,
    connection: &ConnectionIdentifier,
    stack_name: &str,
) -> Result<ResourceGraph> {
    let mut graph = ResourceGraph::new(stack_name);

    let auto_scaling = auto_scaling_node(params, stack_name);
    let auto_scaling_arn = auto_scaling.attribute(AUTO_SCALING_ARN_FIELD);

    let service = ResourceNode::new(SERVICE_LOGICAL_ID, SERVICE_RESOURCE_TYPE)
        .with_property("SourceConfiguration", source_configuration(params, connection))
        .with_property(
            "HealthCheckConfiguration",
            Property::object([
                ("Path", Property::from(HEALTH_CHECK_PATH)),
                ("Protocol", Property::from(HEALTH_CHECK_PROTOCOL)),
            ]),
        )
        .with_property(
            "InstanceConfiguration",
            Property::object([
                ("Cpu", Property::from(&params.instance.cpu)),
                ("Memory", Property::from(&params.instance.memory)),
            ]),
        )
        .with_property("AutoScalingConfigurationArn", auto_scaling_arn);

    graph.add(auto_scaling)?;
    graph.add(service)?;
    Ok(graph)
}

/// Autoscaling configuration as a create-only custom resource
///
/// No delete call is declared: the configuration outlives the stack.
fn auto_scaling_node(params: &DeploymentParameters, stack_name: &str) -> ResourceNode {
    let bounds = params.auto_scaling;
    let create = SdkCall::new("AppRunner", "createAutoScalingConfiguration")
        .with_parameter("AutoScalingConfigurationName", stack_name)
        .with_parameter("MaxConcurrency", bounds.max_concurrency())
        .with_parameter("MaxSize", bounds.max_size())
        .with_parameter("MinSize", bounds.min_size())
        .with_physical_resource_id(AUTO_SCALING_LOGICAL_ID);

    ResourceNode::new(AUTO_SCALING_LOGICAL_ID, CUSTOM_SDK_RESOURCE_TYPE)
        .with_lifecycle(Lifecycle::new().with(LifecycleEvent::Create, create))
}

fn source_configuration(params: &DeploymentParameters, connection: &ConnectionIdentifier) -> Property {
    let source = &params.source;

    let environment = Property::list(RUNTIME_ENVIRONMENT.iter().map(|(name, value)| {
        Property::object([
            ("Name", Property::from(*name)),
            ("Value", Property::from(*value)),
        ])
    }));

    let code_configuration = Property::object([
        ("ConfigurationSource", Property::from("API")),
        (
            "CodeConfigurationValues",
            Property::object([
                ("Runtime", Property::from(RUNTIME)),
                ("BuildCommand", Property::from(&source.build_command)),
                ("StartCommand", Property::from(&source.start_command)),
                ("Port", Property::from(source.port.to_string())),
                ("RuntimeEnvironmentVariables", environment),
            ]),
        ),
    ]);

    Property::object([
        ("AutoDeploymentsEnabled", Property::from(true)),
        (
            "AuthenticationConfiguration",
            Property::object([("ConnectionArn", Property::from(connection.as_str()))]),
        ),
        (
            "CodeRepository",
            Property::object([
                ("RepositoryUrl", Property::from(&source.repository_url)),
                (
                    "SourceCodeVersion",
                    Property::object([
                        ("Type", Property::from("BRANCH")),
                        ("Value", Property::from(&source.branch)),
                    ]),
                ),
                ("CodeConfiguration", code_configuration),
            ]),
        ),
    ])
}
