//! Relation columns.
//!
//! A relation is a many-to-many link stored on a parent object under a key.
//! Its wire form only names the class of the related objects; membership
//! changes travel separately as `AddRelation`/`RemoveRelation` operations.

use crate::wire::{ToWire, WireValue};
use serde_json::json;

/// The object and key a relation hangs off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationParent {
    pub class_name: String,
    pub object_id: Option<String>,
}

/// A handle on a relation column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relation {
    parent: Option<RelationParent>,
    key: Option<String>,
    target_class_name: Option<String>,
}

impl Relation {
    /// Creates a relation stored under `key` on `parent`.
    pub fn new(parent: RelationParent, key: impl Into<String>) -> Self {
        Self {
            parent: Some(parent),
            key: Some(key.into()),
            target_class_name: None,
        }
    }

    /// Creates a detached relation to objects of `class_name`.
    pub fn for_class(class_name: impl Into<String>) -> Self {
        Self {
            target_class_name: Some(class_name.into()),
            ..Self::default()
        }
    }

    /// Sets the class of the related objects.
    #[must_use]
    pub fn with_target_class(mut self, class_name: impl Into<String>) -> Self {
        self.target_class_name = Some(class_name.into());
        self
    }

    pub fn parent(&self) -> Option<&RelationParent> {
        self.parent.as_ref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn target_class_name(&self) -> Option<&str> {
        self.target_class_name.as_deref()
    }
}

impl ToWire for Relation {
    fn to_wire(&self) -> WireValue {
        json!({
            "__type": "Relation",
            "className": self.target_class_name,
        })
    }
}
