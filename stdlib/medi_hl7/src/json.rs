//! JSON rendering of the message tree.
//!
//! Children appear under stable keys (`segments`, `fields`, `repeats`,
//! `composites`, `subComposites`, `values`) next to the delimiter set, so the
//! output can be walked without knowing anything about HL7.

use crate::model::Message;

/// Serializes a message to a compact JSON string.
pub fn to_json(message: &Message) -> serde_json::Result<String> {
    serde_json::to_string(message)
}

/// Serializes a message to an indented JSON string.
pub fn to_json_pretty(message: &Message) -> serde_json::Result<String> {
    serde_json::to_string_pretty(message)
}

/// Converts a message into a generic JSON document.
pub fn to_value(message: &Message) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(message)
}
