//! Request validation module
//!
//! Rejects malformed routing payloads before they reach the router:
//! - body must be a JSON object with `message` and `recipients`
//! - `message` must be a string
//! - `recipients` must be a non-empty array of unique strings
//!
//! Unknown extra fields are allowed and ignored.

mod schema;
mod types;

pub use schema::{RequestSchema, MESSAGE_FIELD, RECIPIENTS_FIELD};
pub use types::{JsonType, RouteRequest};
