//! Recursive value-to-wire encoder.
//!
//! Walks a [`Value`] graph and produces JSON the data service understands.
//! Entities are either embedded in full (`__type: "Object"`) or reduced to a
//! pointer. A per-path seen set breaks cycles: an entity already being
//! embedded by an ancestor is emitted as a pointer, while the same entity
//! reached through two sibling branches is embedded in both.

use crate::entity::{assigned_id, EntityRef};
use crate::error::{EncodeError, EncodeResult};
use crate::value::Value;
use parsekit_types::{wire_type, ParseDate, ToWire, WireValue};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Number};
use std::sync::Arc;
use tracing::{debug, trace};

/// Fields flattened from a date record to its bare ISO string when embedding.
const TIMESTAMP_FIELDS: [&str; 2] = ["createdAt", "updatedAt"];

const EMPTY_PATTERN_SOURCE: &str = "(?:)";

/// Flags controlling an encode call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncodeOptions {
    /// Fail with [`EncodeError::ObjectsNotAllowed`] on any entity.
    pub disallow_objects: bool,
    /// Emit every entity as a pointer, never embedding it.
    pub force_pointers: bool,
}

impl EncodeOptions {
    #[must_use]
    pub fn with_disallow_objects(mut self, disallow: bool) -> Self {
        self.disallow_objects = disallow;
        self
    }

    #[must_use]
    pub fn with_force_pointers(mut self, force: bool) -> Self {
        self.force_pointers = force;
        self
    }
}

/// Identity recorded for an entity on the current recursion path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SeenToken {
    /// A saved entity, named by class and id.
    Identity { class_name: String, object_id: String },
    /// An unsaved entity, named by its allocation.
    Handle(usize),
}

impl SeenToken {
    fn for_entity(entity: &EntityRef) -> Self {
        match assigned_id(entity.as_ref()) {
            Some(object_id) => SeenToken::Identity {
                class_name: entity.class_name().to_string(),
                object_id,
            },
            None => SeenToken::Handle(Arc::as_ptr(entity).cast::<()>() as usize),
        }
    }
}

/// Why an entity was emitted as a pointer instead of embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerReason {
    Forced,
    Cycle,
    Dirty,
    NoServerData,
}

/// Encodes values with a fixed set of [`EncodeOptions`].
///
/// The encoder holds no state between calls; one instance may be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encodes `value` into its wire form.
    pub fn encode(&self, value: &Value) -> EncodeResult<WireValue> {
        self.encode_value(value, &[])
    }

    fn encode_value(&self, value: &Value, seen: &[SeenToken]) -> EncodeResult<WireValue> {
        match value {
            Value::Object(entity) => self.encode_entity(entity, seen),
            Value::Op(op) => op.to_wire(),
            Value::Acl(acl) => Ok(acl.to_wire()),
            Value::GeoPoint(point) => Ok(point.to_wire()),
            Value::Relation(relation) => Ok(relation.to_wire()),
            Value::File(file) => {
                if !file.has_remote_location() {
                    return Err(EncodeError::UnsavedFile {
                        name: file.name().to_string(),
                    });
                }
                Ok(file.to_wire())
            }
            Value::Date(date) => encode_date(date),
            Value::Regex(re) => Ok(WireValue::String(regex_source(re.as_str()))),
            Value::Array(items) => items
                .iter()
                .map(|item| self.encode_value(item, seen))
                .collect::<EncodeResult<Vec<_>>>()
                .map(WireValue::Array),
            Value::Map(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, item) in map {
                    out.insert(key.clone(), self.encode_value(item, seen)?);
                }
                Ok(WireValue::Object(out))
            }
            Value::Null => Ok(WireValue::Null),
            Value::Bool(b) => Ok(WireValue::Bool(*b)),
            Value::Int(n) => Ok(WireValue::from(*n)),
            Value::Float(n) => Number::from_f64(*n)
                .map(WireValue::Number)
                .ok_or_else(|| EncodeError::UnsupportedValue(format!("non-finite number {n}"))),
            Value::String(s) => Ok(WireValue::String(s.clone())),
        }
    }

    fn encode_entity(&self, entity: &EntityRef, seen: &[SeenToken]) -> EncodeResult<WireValue> {
        if self.options.disallow_objects {
            return Err(EncodeError::ObjectsNotAllowed);
        }

        let token = SeenToken::for_entity(entity);
        let data = entity.server_data();
        let reason = if self.options.force_pointers {
            Some(PointerReason::Forced)
        } else if seen.contains(&token) {
            Some(PointerReason::Cycle)
        } else if entity.is_dirty() {
            Some(PointerReason::Dirty)
        } else if data.is_empty() {
            Some(PointerReason::NoServerData)
        } else {
            None
        };
        if let Some(reason) = reason {
            debug!(class_name = entity.class_name(), ?reason, "Encoding entity as pointer");
            return Ok(entity.to_pointer());
        }

        let object_id = assigned_id(entity.as_ref());
        trace!(
            class_name = entity.class_name(),
            object_id = object_id.as_deref().unwrap_or(""),
            depth = seen.len(),
            "Embedding entity"
        );

        let mut path = Vec::with_capacity(seen.len() + 1);
        path.extend_from_slice(seen);
        path.push(token);

        let mut fields = Map::with_capacity(data.len() + 3);
        for (key, item) in &data {
            fields.insert(key.clone(), self.encode_value(item, &path)?);
        }
        for key in TIMESTAMP_FIELDS {
            flatten_date_record(&mut fields, key);
        }
        fields.insert("className".to_string(), json!(entity.class_name()));
        fields.insert("__type".to_string(), json!("Object"));
        if let Some(object_id) = object_id {
            fields.insert("objectId".to_string(), WireValue::String(object_id));
        }
        Ok(WireValue::Object(fields))
    }
}

fn encode_date(date: &ParseDate) -> EncodeResult<WireValue> {
    let iso = date.iso().ok_or(EncodeError::InvalidDate)?;
    Ok(json!({ "__type": "Date", "iso": iso }))
}

/// The pattern text as the wire expects it; an empty pattern reads `(?:)`.
fn regex_source(pattern: &str) -> String {
    if pattern.is_empty() {
        EMPTY_PATTERN_SOURCE.to_string()
    } else {
        pattern.to_string()
    }
}

/// Replaces a `{__type: "Date", iso}` record under `key` with its ISO string.
fn flatten_date_record(fields: &mut Map<String, WireValue>, key: &str) {
    let Some(record) = fields.get_mut(key) else {
        return;
    };
    if wire_type(record) != Some("Date") {
        return;
    }
    if let Some(iso) = record.get("iso").cloned() {
        *record = iso;
    }
}

/// Encodes `value` for transmission.
///
/// With `disallow_objects`, any entity in the graph is an error. With
/// `force_pointers`, entities are always reduced to pointers.
pub fn encode(value: &Value, disallow_objects: bool, force_pointers: bool) -> EncodeResult<WireValue> {
    Encoder::new(EncodeOptions {
        disallow_objects,
        force_pointers,
    })
    .encode(value)
}
