//! Property trees for resource descriptions
//!
//! Values that are only known once the provisioning engine has applied a
//! resource are held as [`Reference`] placeholders and rendered by the
//! synthesizer. Assembly never has to wait for them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Deferred pointer to an attribute of another resource in the same graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// Logical id of the referenced resource
    pub logical_id: String,

    /// Attribute path on that resource (e.g. a response field of its create call)
    pub attribute: String,
}

impl Reference {
    pub fn new(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            attribute: attribute.into(),
        }
    }
}

/// A property value inside a resource description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    String(String),
    Bool(bool),
    Integer(i64),
    List(Vec<Property>),
    Object(BTreeMap<String, Property>),
    Ref(Reference),
}

impl Property {
    /// Builds an object from key/value pairs
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Property)>,
    {
        Property::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn list(items: impl IntoIterator<Item = Property>) -> Self {
        Property::List(items.into_iter().collect())
    }

    /// Looks up a nested value by a dotted path (e.g. "SourceConfiguration.CodeRepository")
    pub fn get_path(&self, path: &str) -> Option<&Property> {
        path.split('.').try_fold(self, |current, key| match current {
            Property::Object(map) => map.get(key),
            _ => None,
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Property::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Property::Ref(r) => Some(r),
            _ => None,
        }
    }

    /// Every reference contained in this tree, depth first
    pub fn references(&self) -> Vec<&Reference> {
        let mut found = Vec::new();
        self.collect_references(&mut found);
        found
    }

    fn collect_references<'a>(&'a self, found: &mut Vec<&'a Reference>) {
        match self {
            Property::Ref(r) => found.push(r),
            Property::List(items) => items.iter().for_each(|p| p.collect_references(found)),
            Property::Object(map) => map.values().for_each(|p| p.collect_references(found)),
            Property::String(_) | Property::Bool(_) | Property::Integer(_) => {}
        }
    }
}

impl From<&str> for Property {
    fn from(value: &str) -> Self {
        Property::String(value.to_string())
    }
}

impl From<String> for Property {
    fn from(value: String) -> Self {
        Property::String(value)
    }
}

impl From<&String> for Property {
    fn from(value: &String) -> Self {
        Property::String(value.clone())
    }
}

impl From<bool> for Property {
    fn from(value: bool) -> Self {
        Property::Bool(value)
    }
}

impl From<i64> for Property {
    fn from(value: i64) -> Self {
        Property::Integer(value)
    }
}

impl From<Reference> for Property {
    fn from(value: Reference) -> Self {
        Property::Ref(value)
    }
}
