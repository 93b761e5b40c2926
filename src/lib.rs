//! # Recipient Router
//!
//! An HTTP service that takes a message and a list of recipients, packs the
//! recipients into fixed-capacity delivery batches, and assigns each batch a
//! synthetic route address.
//!
//! ## Quick Start
//!
//! ```rust
//! use recipient_router::routing::route;
//!
//! let recipients: Vec<String> = (0..13).map(|i| format!("+1555555{i:04}")).collect();
//! let table = route(&recipients);
//!
//! // One batch of 10, then three singles
//! assert_eq!(table.len(), 4);
//! assert_eq!(table.routes()[0].address, "10.0.3.1");
//! assert_eq!(table.routes()[3].address, "10.0.1.3");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! POST /route
//!     │
//!     ▼
//! ┌──────────┐   ┌───────────────┐   ┌──────────────────┐   ┌──────────┐
//! │ Validate │──▶│ Bin 25/10/5/1 │──▶│ Assign 10.0.t.i  │──▶│ Response │
//! └──────────┘   └───────────────┘   └──────────────────┘   └──────────┘
//!   validate        partition             routing             cli::server
//! ```
//!
//! Every stage after validation is a pure function; nothing is shared
//! between requests except the read-only service configuration.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and tier definitions
pub mod types;

/// Greedy chunking and tier binning
pub mod partition;

/// Route assignment and verification
pub mod routing;

/// Request payload validation
pub mod validate;

/// Service configuration
pub mod config;

/// Client for a running routing service
pub mod client;

/// Command-line interface and HTTP server
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use routing::{route, Route, RouteResponse, RouteTable};
pub use types::{Recipient, Tier};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
