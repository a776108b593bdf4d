//! In-memory resource graph handed to the synthesizer

use crate::action::Lifecycle;
use crate::error::{CloudError, Result};
use crate::property::{Property, Reference};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered set of resource descriptions for one stack
///
/// Nodes keep insertion order. A node may only reference nodes that were
/// added before it, so the graph can never hold a dangling or forward
/// reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGraph {
    /// Stack identity the graph was assembled for
    pub stack_name: String,

    nodes: Vec<ResourceNode>,
}

impl ResourceGraph {
    pub fn new(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            nodes: Vec::new(),
        }
    }

    /// Adds a node after checking its id and references
    pub fn add(&mut self, node: ResourceNode) -> Result<()> {
        if self.get(&node.logical_id).is_some() {
            return Err(CloudError::DuplicateResource(node.logical_id));
        }

        for target in node.dependencies() {
            if self.get(target).is_none() {
                return Err(CloudError::DanglingReference {
                    from: node.logical_id.clone(),
                    to: target.to_string(),
                });
            }
        }

        tracing::debug!(
            "Added {} ({}) to graph {}",
            node.logical_id,
            node.resource_type,
            self.stack_name
        );
        self.nodes.push(node);
        Ok(())
    }

    pub fn get(&self, logical_id: &str) -> Option<&ResourceNode> {
        self.nodes.iter().find(|n| n.logical_id == logical_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceNode> {
        self.nodes.iter()
    }

    pub fn by_type(&self, resource_type: &str) -> Vec<&ResourceNode> {
        self.nodes
            .iter()
            .filter(|n| n.resource_type == resource_type)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Description of a single resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNode {
    /// Logical id, unique within the graph
    pub logical_id: String,

    /// Template resource type (e.g. "AWS::AppRunner::Service", "Custom::AWS")
    pub resource_type: String,

    /// Resource properties
    pub properties: BTreeMap<String, Property>,

    /// SDK calls for custom resources; empty for native types
    #[serde(default)]
    pub lifecycle: Lifecycle,
}

impl ResourceNode {
    pub fn new(logical_id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            resource_type: resource_type.into(),
            properties: BTreeMap::new(),
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Property>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Reference to an attribute of this node, for use in later nodes
    pub fn attribute(&self, attribute: impl Into<String>) -> Reference {
        Reference::new(self.logical_id.clone(), attribute)
    }

    /// Looks up a property by a dotted path
    pub fn property(&self, path: &str) -> Option<&Property> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let root = self.properties.get(head)?;
        match rest {
            Some(rest) => root.get_path(rest),
            None => Some(root),
        }
    }

    /// Logical ids this node depends on through references, deduplicated in order
    pub fn dependencies(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for reference in self.properties.values().flat_map(Property::references) {
            if !ids.contains(&reference.logical_id.as_str()) {
                ids.push(&reference.logical_id);
            }
        }
        ids
    }
}
