//! Lifecycle SDK calls attached to custom resources
//!
//! A custom resource does not map to a native template type. Instead the
//! provisioning engine invokes a control-plane SDK call when the resource is
//! created, updated or deleted. Only the events that carry a call are acted on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single control-plane SDK call executed by the provisioning engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkCall {
    /// SDK service name (e.g., "AppRunner")
    pub service: String,

    /// SDK action in camelCase (e.g., "createAutoScalingConfiguration")
    pub action: String,

    /// Request parameters
    pub parameters: BTreeMap<String, String>,

    /// Physical id the engine records for the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<PhysicalResourceId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalResourceId {
    pub id: String,
}

impl SdkCall {
    pub fn new(service: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            action: action.into(),
            parameters: BTreeMap::new(),
            physical_resource_id: None,
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.insert(key.into(), value.to_string());
        self
    }

    pub fn with_physical_resource_id(mut self, id: impl Into<String>) -> Self {
        self.physical_resource_id = Some(PhysicalResourceId { id: id.into() });
        self
    }
}

/// Lifecycle event of a custom resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    Create,
    Update,
    Delete,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 3] = [
        LifecycleEvent::Create,
        LifecycleEvent::Update,
        LifecycleEvent::Delete,
    ];

    /// Property key the template uses for this event
    pub fn template_key(&self) -> &'static str {
        match self {
            LifecycleEvent::Create => "Create",
            LifecycleEvent::Update => "Update",
            LifecycleEvent::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleEvent::Create => write!(f, "create"),
            LifecycleEvent::Update => write!(f, "update"),
            LifecycleEvent::Delete => write!(f, "delete"),
        }
    }
}

/// SDK calls declared per lifecycle event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_create: Option<SdkCall>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_update: Option<SdkCall>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<SdkCall>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, event: LifecycleEvent, call: SdkCall) -> Self {
        match event {
            LifecycleEvent::Create => self.on_create = Some(call),
            LifecycleEvent::Update => self.on_update = Some(call),
            LifecycleEvent::Delete => self.on_delete = Some(call),
        }
        self
    }

    pub fn on(&self, event: LifecycleEvent) -> Option<&SdkCall> {
        match event {
            LifecycleEvent::Create => self.on_create.as_ref(),
            LifecycleEvent::Update => self.on_update.as_ref(),
            LifecycleEvent::Delete => self.on_delete.as_ref(),
        }
    }

    /// Declared calls in create/update/delete order
    pub fn calls(&self) -> impl Iterator<Item = (LifecycleEvent, &SdkCall)> {
        LifecycleEvent::ALL
            .into_iter()
            .filter_map(|event| self.on(event).map(|call| (event, call)))
    }

    pub fn is_empty(&self) -> bool {
        self.calls().next().is_none()
    }
}
