//! Entity references

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to something a manager can resolve traits for
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityReference(String);

impl EntityReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityReference {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityReference {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Ordered list of entity references; results correlate by position
pub type EntityReferences = Vec<EntityReference>;
