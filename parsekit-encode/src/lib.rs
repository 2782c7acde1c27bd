//! Value-to-wire encoding for the parsekit SDK.
//!
//! Converts a graph of application values (domain objects, geo points, ACLs,
//! relations, files, pending field ops, dates, regular expressions, arrays
//! and maps) into JSON the data service accepts.
//!
//! # Entities
//!
//! Each entity reached during encoding is either embedded in full or reduced
//! to a pointer. It is embedded only when it is clean, has confirmed fields,
//! pointers are not forced, and it is not already being embedded by one of
//! its ancestors. The last rule makes encoding terminate on cyclic graphs
//! while still embedding an entity reached through two separate branches.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parsekit_encode::{encode, ParseObject, Value};
//! use serde_json::json;
//!
//! let game = Arc::new(ParseObject::with_id("Game", "abc1"));
//! game.set_server_field("score", 5);
//!
//! let wire = encode(&Value::object(game.clone()), false, false).unwrap();
//! assert_eq!(
//!     wire,
//!     json!({ "__type": "Object", "className": "Game", "objectId": "abc1", "score": 5 })
//! );
//!
//! let pointer = encode(&Value::object(game), false, true).unwrap();
//! assert_eq!(
//!     pointer,
//!     json!({ "__type": "Pointer", "className": "Game", "objectId": "abc1" })
//! );
//! ```

mod encoder;
mod entity;
mod error;
mod object;
mod op;
mod value;

pub use encoder::{encode, EncodeOptions, Encoder};
pub use entity::{EntityRef, ParseEntity};
pub use error::{EncodeError, EncodeResult};
pub use object::ParseObject;
pub use op::Op;
pub use value::{Value, ValueMap};

pub use parsekit_types::{
    Acl, GeoPoint, ParseDate, ParseFile, Relation, RelationParent, ToWire, WireValue,
};
