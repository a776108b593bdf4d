//! AWS App Runner provider for runway
//!
//! Resolves the App Runner source connection, assembles the service stack
//! and renders it as a CloudFormation template.
//!
//! # Requirements
//!
//! - AWS credentials available through the SDK default chain
//! - An App Runner connection created (and handshaken) in the console beforehand
//!
//! # Example
//!
//! ```ignore
//! use runway_cloud::ConnectionResolver;
//! use runway_cloud_aws::{AppRunnerControlPlane, StackPipeline, write_assembly};
//!
//! let loaded = runway_config::load()?;
//! let region = loaded.environment.as_ref().and_then(|e| e.region.as_deref());
//!
//! let control_plane = AppRunnerControlPlane::connect(region).await;
//! let pipeline = StackPipeline::new(ConnectionResolver::new(control_plane));
//!
//! let stack = pipeline.run(&loaded.params, "AppRunnerStack").await?;
//! write_assembly(&stack.template, loaded.environment.as_ref(), "runway.out".as_ref()).await?;
//! ```

pub mod assembler;
pub mod control_plane;
pub mod error;
pub mod stack;
pub mod synth;

pub use assembler::assemble;
pub use control_plane::AppRunnerControlPlane;
pub use error::{AwsError, Result};
pub use stack::{DEFAULT_STACK_NAME, StackPipeline, SynthesizedStack};
pub use synth::{Assembly, CloudFormationSynthesizer, Template, environment_uri, write_assembly};
