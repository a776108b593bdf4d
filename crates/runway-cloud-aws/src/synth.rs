//! CloudFormation synthesis
//!
//! Renders a [`ResourceGraph`] into a CloudFormation template and writes it,
//! together with a manifest, into an output directory the provisioning
//! engine picks up.

use crate::error::Result;
use runway_cloud::{Property, ResourceGraph, ResourceNode, Synthesizer};
use runway_config::TargetEnvironment;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";
const MANIFEST_FILE: &str = "manifest.json";
const MANIFEST_VERSION: &str = "1";

/// Template parameter holding the ARN of the Lambda-backed handler that runs
/// the SDK calls of `Custom::AWS` resources
pub const SDK_PROVIDER_PARAMETER: &str = "SdkCallProviderArn";

/// A synthesized template for one stack
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub stack_name: String,
    pub body: Value,
}

impl Template {
    pub fn file_name(&self) -> String {
        format!("{}.template.json", self.stack_name)
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Value> {
        self.body.get("Resources").and_then(|r| r.get(logical_id))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.body)?)
    }
}

/// Graph to CloudFormation renderer
#[derive(Debug, Clone, Default)]
pub struct CloudFormationSynthesizer {
    description: Option<String>,
}

impl CloudFormationSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn render_node(&self, node: &ResourceNode) -> runway_cloud::Result<Value> {
        let mut properties = Map::new();

        if !node.lifecycle.is_empty() {
            properties.insert(
                "ServiceToken".to_string(),
                json!({ "Ref": SDK_PROVIDER_PARAMETER }),
            );
            for (event, call) in node.lifecycle.calls() {
                properties.insert(
                    event.template_key().to_string(),
                    Value::String(serde_json::to_string(call)?),
                );
            }
            properties.insert("InstallLatestAwsSdk".to_string(), Value::Bool(false));
        }

        for (key, value) in &node.properties {
            properties.insert(key.clone(), render_property(value));
        }

        let mut resource = Map::new();
        resource.insert("Type".to_string(), json!(node.resource_type));
        resource.insert("Properties".to_string(), Value::Object(properties));

        let dependencies = node.dependencies();
        if !dependencies.is_empty() {
            resource.insert("DependsOn".to_string(), json!(dependencies));
        }

        Ok(Value::Object(resource))
    }
}

impl Synthesizer for CloudFormationSynthesizer {
    type Output = Template;

    fn synthesize(&self, graph: &ResourceGraph) -> runway_cloud::Result<Template> {
        let mut resources = Map::new();
        let mut uses_sdk_provider = false;

        for node in graph.iter() {
            uses_sdk_provider |= !node.lifecycle.is_empty();
            resources.insert(node.logical_id.clone(), self.render_node(node)?);
        }

        let mut body = Map::new();
        body.insert(
            "AWSTemplateFormatVersion".to_string(),
            json!(TEMPLATE_FORMAT_VERSION),
        );
        let description = self
            .description
            .clone()
            .unwrap_or_else(|| format!("App Runner service stack {}", graph.stack_name));
        body.insert("Description".to_string(), json!(description));

        if uses_sdk_provider {
            body.insert(
                "Parameters".to_string(),
                json!({
                    SDK_PROVIDER_PARAMETER: {
                        "Type": "String",
                        "Description": "ARN of the Lambda function that executes AWS SDK calls for Custom::AWS resources"
                    }
                }),
            );
        }
        body.insert("Resources".to_string(), Value::Object(resources));

        tracing::debug!(
            "Synthesized {} resource(s) for {}",
            graph.len(),
            graph.stack_name
        );

        Ok(Template {
            stack_name: graph.stack_name.clone(),
            body: Value::Object(body),
        })
    }
}

/// Renders a property tree, turning references into `Fn::GetAtt`
pub fn render_property(property: &Property) -> Value {
    match property {
        Property::String(s) => Value::String(s.clone()),
        Property::Bool(b) => Value::Bool(*b),
        Property::Integer(i) => json!(i),
        Property::List(items) => Value::Array(items.iter().map(render_property).collect()),
        Property::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), render_property(v)))
                .collect(),
        ),
        Property::Ref(r) => json!({ "Fn::GetAtt": [r.logical_id, r.attribute] }),
    }
}

/// `aws://<account>/<region>` with `unknown-*` placeholders when agnostic
pub fn environment_uri(environment: Option<&TargetEnvironment>) -> String {
    let account = environment
        .and_then(|e| e.account.as_deref())
        .unwrap_or("unknown-account");
    let region = environment
        .and_then(|e| e.region.as_deref())
        .unwrap_or("unknown-region");
    format!("aws://{}/{}", account, region)
}

#[derive(Debug, Serialize)]
struct Manifest {
    version: String,
    artifacts: BTreeMap<String, Artifact>,
}

#[derive(Debug, Serialize)]
struct Artifact {
    #[serde(rename = "type")]
    artifact_type: String,
    environment: String,
    properties: ArtifactProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactProperties {
    template_file: String,
}

/// Files written by [`write_assembly`]
#[derive(Debug, Clone)]
pub struct Assembly {
    pub template_path: PathBuf,
    pub manifest_path: PathBuf,
}

/// Writes the template and its manifest into `outdir`
///
/// The stack name becomes the template file name, so it must be a valid
/// stack name; anything else is rejected before touching the filesystem.
pub async fn write_assembly(
    template: &Template,
    environment: Option<&TargetEnvironment>,
    outdir: &Path,
) -> Result<Assembly> {
    runway_config::validate_stack_name(&template.stack_name)?;

    if !outdir.exists() {
        fs::create_dir_all(outdir).await?;
        tracing::debug!("Created output directory: {}", outdir.display());
    }

    let template_path = outdir.join(template.file_name());
    fs::write(&template_path, template.to_json_pretty()?).await?;

    let manifest = Manifest {
        version: MANIFEST_VERSION.to_string(),
        artifacts: BTreeMap::from([(
            template.stack_name.clone(),
            Artifact {
                artifact_type: "aws:cloudformation:stack".to_string(),
                environment: environment_uri(environment),
                properties: ArtifactProperties {
                    template_file: template.file_name(),
                },
            },
        )]),
    };
    let manifest_path = outdir.join(MANIFEST_FILE);
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?).await?;

    tracing::info!("Wrote {}", template_path.display());
    Ok(Assembly {
        template_path,
        manifest_path,
    })
}
