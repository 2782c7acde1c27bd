//! Pending field operations.
//!
//! An op is a queued mutation instruction for one field of an object. Its
//! wire form is self-contained: operands are encoded here, with entities
//! always reduced to pointers, so the encoder can emit it without further
//! recursion.

use crate::encoder::{EncodeOptions, Encoder};
use crate::entity::{assigned_id, EntityRef};
use crate::error::{EncodeError, EncodeResult};
use crate::value::Value;
use parsekit_types::WireValue;
use serde_json::{json, Number};

/// A queued mutation of a single field.
#[derive(Debug, Clone)]
pub enum Op {
    /// Replace the field with a value.
    Set(Value),
    /// Delete the field.
    Unset,
    /// Add a number to the field.
    Increment(Number),
    /// Append values to an array field.
    Add(Vec<Value>),
    /// Append values not already present in an array field.
    AddUnique(Vec<Value>),
    /// Remove all occurrences of values from an array field.
    Remove(Vec<Value>),
    /// Add saved objects to a relation field.
    AddRelation(Vec<EntityRef>),
    /// Remove saved objects from a relation field.
    RemoveRelation(Vec<EntityRef>),
    /// Several ops applied to the same field in order.
    Batch(Vec<Op>),
}

impl Op {
    /// Name used in the `__op` discriminator, or `None` for a plain set.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Op::Set(_) => None,
            Op::Unset => Some("Delete"),
            Op::Increment(_) => Some("Increment"),
            Op::Add(_) => Some("Add"),
            Op::AddUnique(_) => Some("AddUnique"),
            Op::Remove(_) => Some("Remove"),
            Op::AddRelation(_) => Some("AddRelation"),
            Op::RemoveRelation(_) => Some("RemoveRelation"),
            Op::Batch(_) => Some("Batch"),
        }
    }

    /// Serializes the op to its wire record.
    pub fn to_wire(&self) -> EncodeResult<WireValue> {
        let operands = Encoder::new(EncodeOptions::default().with_force_pointers(true));
        match self {
            Op::Set(value) => operands.encode(value),
            Op::Unset => Ok(json!({ "__op": "Delete" })),
            Op::Increment(amount) => Ok(json!({ "__op": "Increment", "amount": amount })),
            Op::Add(values) | Op::AddUnique(values) | Op::Remove(values) => {
                let objects = values
                    .iter()
                    .map(|v| operands.encode(v))
                    .collect::<EncodeResult<Vec<_>>>()?;
                Ok(json!({ "__op": self.name(), "objects": objects }))
            }
            Op::AddRelation(targets) | Op::RemoveRelation(targets) => Ok(json!({
                "__op": self.name(),
                "objects": relation_pointers(targets)?,
            })),
            Op::Batch(ops) => {
                let ops = ops
                    .iter()
                    .map(Op::to_wire)
                    .collect::<EncodeResult<Vec<_>>>()?;
                Ok(json!({ "__op": "Batch", "ops": ops }))
            }
        }
    }
}

/// Pointers for relation targets, which must be saved and share one class.
fn relation_pointers(targets: &[EntityRef]) -> EncodeResult<Vec<WireValue>> {
    let mut target_class: Option<&str> = None;
    let mut pointers = Vec::with_capacity(targets.len());
    for target in targets {
        let class_name = target.class_name();
        if assigned_id(target.as_ref()).is_none() {
            return Err(EncodeError::UnsavedRelationTarget {
                class_name: class_name.to_string(),
            });
        }
        match target_class {
            Some(expected) if expected != class_name => {
                return Err(EncodeError::RelationClassMismatch {
                    expected: expected.to_string(),
                    found: class_name.to_string(),
                });
            }
            _ => target_class = Some(class_name),
        }
        pointers.push(target.to_pointer());
    }
    Ok(pointers)
}
