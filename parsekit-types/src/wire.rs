//! The JSON wire representation shared by every encodable type.

/// A JSON-safe value ready for transmission.
pub type WireValue = serde_json::Value;

/// Key carrying the type discriminator of a tagged wire record.
pub const TYPE_KEY: &str = "__type";

/// Types with a self-contained wire form.
pub trait ToWire {
    /// Serializes `self` into its wire record.
    fn to_wire(&self) -> WireValue;
}

/// Returns the `__type` discriminator of a tagged wire record, if any.
pub fn wire_type(value: &WireValue) -> Option<&str> {
    value.get(TYPE_KEY).and_then(WireValue::as_str)
}
