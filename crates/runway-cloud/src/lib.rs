//! runway cloud abstraction
//!
//! Provider-neutral pieces shared by the provider crates:
//!
//! - [`ResourceGraph`]: ordered resource descriptions with typed deferred
//!   [`Reference`]s, consumed once by a [`Synthesizer`]
//! - [`Lifecycle`] / [`SdkCall`]: control-plane calls attached to custom resources
//! - [`ControlPlane`] / [`ConnectionResolver`]: the single live lookup a run performs
//!
//! ```text
//! ┌──────────────┐   ┌────────────────────┐   ┌──────────────┐
//! │ runway-config│──▶│ ConnectionResolver │──▶│  assembler   │──▶ Synthesizer
//! └──────────────┘   │  (ControlPlane)    │   │ ResourceGraph│
//!                    └────────────────────┘   └──────────────┘
//! ```

pub mod action;
pub mod error;
pub mod graph;
pub mod property;
pub mod provider;
pub mod resolver;

// Re-exports
pub use action::{Lifecycle, LifecycleEvent, PhysicalResourceId, SdkCall};
pub use error::{CloudError, Result};
pub use graph::{ResourceGraph, ResourceNode};
pub use property::{Property, Reference};
pub use provider::{ConnectionSummary, ControlPlane, Synthesizer};
pub use resolver::{ConnectionIdentifier, ConnectionResolver, DEFAULT_LOOKUP_TIMEOUT};
