//! Error types for wire encoding.

use thiserror::Error;

/// Result type for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors that abort an encode call.
///
/// The encoder never recovers from these: the first failure anywhere in the
/// value graph ends the whole call and no partial wire tree is returned.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// An entity was found while entities are disallowed.
    #[error("Parse Objects not allowed here")]
    ObjectsNotAllowed,

    /// A file without a remote location cannot be referenced.
    #[error("tried to encode an unsaved file: {name}")]
    UnsavedFile { name: String },

    /// A date whose timestamp is not a number or out of range.
    #[error("tried to encode an invalid date")]
    InvalidDate,

    /// A value the wire grammar cannot represent.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// Relation membership ops only accept saved objects.
    #[error("can't add an unsaved {class_name} to a relation")]
    UnsavedRelationTarget { class_name: String },

    /// Relation membership ops must target a single class.
    #[error("relation targets must share one class: expected {expected}, found {found}")]
    RelationClassMismatch { expected: String, found: String },
}
