//! The application value universe accepted by the encoder.

use crate::entity::{EntityRef, ParseEntity};
use crate::op::Op;
use indexmap::IndexMap;
use parsekit_types::{Acl, GeoPoint, ParseDate, ParseFile, Relation};
use regex::Regex;
use std::sync::Arc;

/// A string-keyed mapping. Only the entries inserted into it are traversed.
pub type ValueMap = IndexMap<String, Value>;

/// Any value that can appear in an object's fields or a request payload.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Map(ValueMap),
    /// A domain entity, embedded or referenced depending on its state.
    Object(EntityRef),
    /// A pending field operation.
    Op(Box<Op>),
    Acl(Acl),
    GeoPoint(GeoPoint),
    Relation(Relation),
    File(ParseFile),
    Date(ParseDate),
    /// Encoded as its bare source pattern; flags do not survive.
    Regex(Regex),
}

impl Value {
    /// Wraps an entity handle.
    pub fn object<T: ParseEntity + 'static>(entity: Arc<T>) -> Self {
        Value::Object(entity)
    }

    /// Returns true if this is `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&ParseDate> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&EntityRef> {
        match self {
            Value::Object(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Value::Map(map)
    }
}

impl From<EntityRef> for Value {
    fn from(entity: EntityRef) -> Self {
        Value::Object(entity)
    }
}

impl From<Op> for Value {
    fn from(op: Op) -> Self {
        Value::Op(Box::new(op))
    }
}

impl From<Acl> for Value {
    fn from(acl: Acl) -> Self {
        Value::Acl(acl)
    }
}

impl From<GeoPoint> for Value {
    fn from(point: GeoPoint) -> Self {
        Value::GeoPoint(point)
    }
}

impl From<Relation> for Value {
    fn from(relation: Relation) -> Self {
        Value::Relation(relation)
    }
}

impl From<ParseFile> for Value {
    fn from(file: ParseFile) -> Self {
        Value::File(file)
    }
}

impl From<ParseDate> for Value {
    fn from(date: ParseDate) -> Self {
        Value::Date(date)
    }
}

impl From<Regex> for Value {
    fn from(re: Regex) -> Self {
        Value::Regex(re)
    }
}

/// Lifts plain JSON into the value universe structurally.
///
/// Unsigned integers beyond `i64::MAX` become floats.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
