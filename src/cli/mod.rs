//! CLI module
//!
//! Command-line interface for the routing service.
//!
//! # Commands
//!
//! - `serve` - Start HTTP server mode
//! - `route` - Compute a route table locally
//! - `verify` - Check a running server's route tables
//! - `tiers` - List capacity tiers

mod commands;
mod logging;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use logging::log_filter;
pub use runner::Runner;
pub use server::{build_router, serve, AppState};
