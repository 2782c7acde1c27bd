//! References to stored binary files.

use crate::wire::{ToWire, WireValue};
use serde_json::json;

/// A named file, optionally uploaded to durable storage.
///
/// A file only becomes addressable once the service has assigned it a URL;
/// until then it cannot be referenced from other values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFile {
    name: String,
    url: Option<String>,
}

impl ParseFile {
    /// Creates a local, not yet uploaded file.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    /// Creates a file already stored at `url`.
    pub fn saved(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Records the name and URL assigned by the service after upload.
    pub fn mark_saved(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.name = name.into();
        self.url = Some(url.into());
    }

    /// Returns true once the file has a durable address.
    pub fn has_remote_location(&self) -> bool {
        self.url.is_some()
    }
}

impl ToWire for ParseFile {
    fn to_wire(&self) -> WireValue {
        json!({
            "__type": "File",
            "name": self.name,
            "url": self.url,
        })
    }
}
