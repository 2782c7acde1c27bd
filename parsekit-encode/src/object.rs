//! The reference entity implementation.
//!
//! A [`ParseObject`] keeps two layers of state: fields confirmed by the
//! server and a queue of pending ops not yet saved. All state sits behind
//! locks so objects can be shared through `Arc` and wired into each other
//! (including cycles) after construction.

use crate::entity::ParseEntity;
use crate::error::EncodeResult;
use crate::op::Op;
use crate::value::{Value, ValueMap};
use indexmap::IndexMap;
use parsekit_types::{ParseDate, WireValue};
use serde_json::{json, Map, Number};
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;
use uuid::Uuid;

/// A domain object of some class, addressed by `objectId` once saved.
pub struct ParseObject {
    class_name: String,
    /// Client-side id used to point at the object before it is saved.
    local_id: String,
    object_id: RwLock<Option<String>>,
    server_data: RwLock<ValueMap>,
    pending: RwLock<IndexMap<String, Op>>,
}

impl ParseObject {
    /// Creates a new, unsaved object.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            local_id: Uuid::new_v4().to_string(),
            object_id: RwLock::new(None),
            server_data: RwLock::new(ValueMap::new()),
            pending: RwLock::new(IndexMap::new()),
        }
    }

    /// Creates an object that already exists on the server.
    pub fn with_id(class_name: impl Into<String>, object_id: impl Into<String>) -> Self {
        let object = Self::new(class_name);
        object.set_object_id(object_id);
        object
    }

    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    pub fn set_object_id(&self, object_id: impl Into<String>) {
        *write(&self.object_id) = Some(object_id.into());
    }

    // ── Confirmed state ──────────────────────────────────────────

    /// Replaces the confirmed fields wholesale.
    pub fn set_server_data(&self, data: ValueMap) {
        *write(&self.server_data) = data;
    }

    /// Records a single confirmed field.
    pub fn set_server_field(&self, key: impl Into<String>, value: impl Into<Value>) {
        write(&self.server_data).insert(key.into(), value.into());
    }

    pub fn created_at(&self) -> Option<ParseDate> {
        read(&self.server_data)
            .get("createdAt")
            .and_then(Value::as_date)
            .copied()
    }

    pub fn updated_at(&self) -> Option<ParseDate> {
        read(&self.server_data)
            .get("updatedAt")
            .and_then(Value::as_date)
            .copied()
    }

    /// Current value of a field.
    ///
    /// A queued `Set` or `Unset` wins over the confirmed value; other ops are
    /// not estimated locally and leave the confirmed value visible.
    pub fn get(&self, key: &str) -> Option<Value> {
        match read(&self.pending).get(key) {
            Some(Op::Set(value)) => return Some(value.clone()),
            Some(Op::Unset) => return None,
            _ => {}
        }
        read(&self.server_data).get(key).cloned()
    }

    // ── Pending ops ──────────────────────────────────────────────

    /// Queues `op` for `key`, replacing any op already queued for it.
    pub fn queue(&self, key: impl Into<String>, op: Op) {
        write(&self.pending).insert(key.into(), op);
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.queue(key, Op::Set(value.into()));
    }

    pub fn unset(&self, key: impl Into<String>) {
        self.queue(key, Op::Unset);
    }

    pub fn increment(&self, key: impl Into<String>, amount: impl Into<Number>) {
        self.queue(key, Op::Increment(amount.into()));
    }

    pub fn add(&self, key: impl Into<String>, values: Vec<Value>) {
        self.queue(key, Op::Add(values));
    }

    pub fn add_unique(&self, key: impl Into<String>, values: Vec<Value>) {
        self.queue(key, Op::AddUnique(values));
    }

    pub fn remove(&self, key: impl Into<String>, values: Vec<Value>) {
        self.queue(key, Op::Remove(values));
    }

    /// Names of fields with queued ops, in queue order.
    pub fn dirty_keys(&self) -> Vec<String> {
        read(&self.pending).keys().cloned().collect()
    }

    /// Encodes the queued ops as the body of a save request.
    pub fn save_payload(&self) -> EncodeResult<WireValue> {
        let pending = read(&self.pending);
        let mut body = Map::with_capacity(pending.len());
        for (key, op) in pending.iter() {
            body.insert(key.clone(), op.to_wire()?);
        }
        Ok(WireValue::Object(body))
    }

    /// Applies a successful save response.
    ///
    /// Queued `Set`/`Unset` ops are folded into the confirmed fields, then the
    /// response's fields are recorded. `objectId` assigns identity and
    /// `createdAt`/`updatedAt` strings are parsed into dates.
    pub fn handle_save_response(&self, response: ValueMap) {
        let ops = std::mem::take(&mut *write(&self.pending));
        let mut data = write(&self.server_data);
        for (key, op) in ops {
            match op {
                Op::Set(value) => {
                    data.insert(key, value);
                }
                Op::Unset => {
                    data.shift_remove(&key);
                }
                _ => {}
            }
        }
        for (key, value) in response {
            match (key.as_str(), &value) {
                ("objectId", Value::String(id)) => {
                    *write(&self.object_id) = Some(id.clone());
                }
                ("createdAt" | "updatedAt", Value::String(iso)) => match iso.parse::<ParseDate>() {
                    Ok(date) => {
                        data.insert(key, Value::Date(date));
                    }
                    Err(e) => {
                        debug!(class_name = %self.class_name, error = %e, "Ignoring malformed timestamp in save response");
                    }
                },
                _ => {
                    data.insert(key, value);
                }
            }
        }
        debug!(
            class_name = %self.class_name,
            object_id = ?read(&self.object_id).as_deref(),
            "Applied save response"
        );
    }
}

impl ParseEntity for ParseObject {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn object_id(&self) -> Option<String> {
        read(&self.object_id).clone()
    }

    /// Unsaved objects and objects with queued ops are dirty.
    fn is_dirty(&self) -> bool {
        read(&self.object_id).is_none() || !read(&self.pending).is_empty()
    }

    fn server_data(&self) -> ValueMap {
        read(&self.server_data).clone()
    }

    fn to_pointer(&self) -> WireValue {
        match self.object_id() {
            Some(object_id) => json!({
                "__type": "Pointer",
                "className": self.class_name,
                "objectId": object_id,
            }),
            None => json!({
                "__type": "Pointer",
                "className": self.class_name,
                "_localId": self.local_id,
            }),
        }
    }
}

// Field values may point back at this object, so only identity is printed.
impl fmt::Debug for ParseObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseObject")
            .field("class_name", &self.class_name)
            .field("object_id", &self.object_id())
            .field("dirty_keys", &self.dirty_keys())
            .finish_non_exhaustive()
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
