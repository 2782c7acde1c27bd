//! The capability contract the encoder needs from a domain entity.

use crate::value::ValueMap;
use parsekit_types::WireValue;
use std::fmt;
use std::sync::Arc;

/// A shared handle on an entity inside a value graph.
pub type EntityRef = Arc<dyn ParseEntity>;

/// A domain object stored by the data service.
///
/// The encoder only reads through this trait; it never mutates entities.
/// Implementations must keep their `Debug` output non-recursive, since
/// entities routinely reference each other in cycles.
pub trait ParseEntity: fmt::Debug + Send + Sync {
    /// The class (table) this entity belongs to.
    fn class_name(&self) -> &str;

    /// The server-assigned id, or `None` before the first save.
    fn object_id(&self) -> Option<String>;

    /// Returns true when local changes have not been confirmed by the server.
    fn is_dirty(&self) -> bool;

    /// Snapshot of the fields confirmed by the server.
    fn server_data(&self) -> ValueMap;

    /// The pointer record naming this entity.
    fn to_pointer(&self) -> WireValue;
}

/// Returns the entity's id if one has been assigned.
///
/// An empty id counts as unassigned.
pub(crate) fn assigned_id(entity: &dyn ParseEntity) -> Option<String> {
    entity.object_id().filter(|id| !id.is_empty())
}
