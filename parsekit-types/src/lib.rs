//! Leaf wire types for the parsekit SDK.
//!
//! This crate defines the value types that know how to serialize themselves
//! to the data service's JSON wire format without recursing into arbitrary
//! application values:
//! - [`ParseDate`] — a millisecond timestamp that may be invalid (NaN)
//! - [`GeoPoint`] — a validated latitude/longitude pair
//! - [`Acl`] — per-user, per-role and public read/write permissions
//! - [`Relation`] — a handle on a many-to-many relation column
//! - [`ParseFile`] — a reference to a stored binary file
//!
//! The recursive encoder that walks whole value graphs lives in
//! `parsekit-encode`.

mod acl;
mod date;
mod file;
mod geo;
mod relation;
mod wire;

pub use acl::{Acl, Permissions, PUBLIC_KEY, ROLE_PREFIX};
pub use date::ParseDate;
pub use file::ParseFile;
pub use geo::GeoPoint;
pub use relation::{Relation, RelationParent};
pub use wire::{wire_type, ToWire, WireValue, TYPE_KEY};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing leaf values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid geo point: {0}")]
    InvalidGeoPoint(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),
}
