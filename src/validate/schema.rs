//! Request schema
//!
//! Structural checks applied to a routing payload before any partitioning
//! happens. Error messages follow JSON Schema validator wording so clients
//! see the familiar `'recipients' is a required property` style.

use super::types::{JsonType, RouteRequest};
use crate::error::{Error, Result};
use serde_json::{json, Value};
use std::collections::HashSet;

/// Field holding the message text
pub const MESSAGE_FIELD: &str = "message";

/// Field holding the recipient list
pub const RECIPIENTS_FIELD: &str = "recipients";

/// Immutable description of a valid routing payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSchema {
    /// Schema title
    title: String,
    /// Minimum number of recipients
    min_recipients: usize,
    /// Whether recipients must be unique
    unique_recipients: bool,
}

impl Default for RequestSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSchema {
    /// Schema requiring a string message and at least one unique recipient
    pub fn new() -> Self {
        Self {
            title: "Route Request Schema".to_string(),
            min_recipients: 1,
            unique_recipients: true,
        }
    }

    /// Check a decoded JSON value against the schema
    pub fn validate(&self, value: &Value) -> Result<()> {
        let Value::Object(map) = value else {
            return Err(not_of_type(value, JsonType::Object));
        };

        for field in [MESSAGE_FIELD, RECIPIENTS_FIELD] {
            if !map.contains_key(field) {
                return Err(Error::validation(format!(
                    "'{field}' is a required property"
                )));
            }
        }

        let message = &map[MESSAGE_FIELD];
        if !message.is_string() {
            return Err(not_of_type(message, JsonType::String));
        }

        let recipients_value = &map[RECIPIENTS_FIELD];
        let Value::Array(recipients) = recipients_value else {
            return Err(not_of_type(recipients_value, JsonType::Array));
        };

        if recipients.len() < self.min_recipients {
            return Err(Error::validation(format!(
                "{recipients_value} is too short"
            )));
        }

        if let Some(item) = recipients.iter().find(|item| !item.is_string()) {
            return Err(not_of_type(item, JsonType::String));
        }

        if self.unique_recipients {
            let mut seen = HashSet::with_capacity(recipients.len());
            if !recipients.iter().filter_map(Value::as_str).all(|r| seen.insert(r)) {
                return Err(Error::validation(format!(
                    "{recipients_value} has non-unique elements"
                )));
            }
        }

        Ok(())
    }

    /// Validate a JSON value and convert it into a request
    pub fn decode_value(&self, value: Value) -> Result<RouteRequest> {
        self.validate(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Parse a raw request body, validate it, and convert it into a request
    pub fn decode(&self, body: &[u8]) -> Result<RouteRequest> {
        let value: Value = serde_json::from_slice(body)?;
        self.decode_value(value)
    }

    /// Render the schema as a JSON Schema document
    pub fn to_json_schema(&self) -> Value {
        json!({
            "title": self.title,
            "type": "object",
            "properties": {
                "message": { "type": "string" },
                "recipients": {
                    "type": "array",
                    "minItems": self.min_recipients,
                    "items": { "type": "string" },
                    "uniqueItems": self.unique_recipients
                }
            },
            "required": [MESSAGE_FIELD, RECIPIENTS_FIELD]
        })
    }
}

fn not_of_type(value: &Value, expected: JsonType) -> Error {
    Error::validation(format!("{value} is not of type '{expected}'"))
}
