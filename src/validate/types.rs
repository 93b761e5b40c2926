//! Request types

use crate::types::Recipient;
use serde::{Deserialize, Serialize};

/// JSON type names as used in schema error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    String,
    Object,
    Array,
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonType::String => write!(f, "string"),
            JsonType::Object => write!(f, "object"),
            JsonType::Array => write!(f, "array"),
        }
    }
}

/// Decoded body of a routing request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Message to deliver
    pub message: String,
    /// Unique recipients, in delivery order
    pub recipients: Vec<Recipient>,
}

impl RouteRequest {
    /// Create a new request
    pub fn new(message: impl Into<String>, recipients: Vec<Recipient>) -> Self {
        Self {
            message: message.into(),
            recipients,
        }
    }
}
