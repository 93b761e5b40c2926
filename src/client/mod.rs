//! Client module
//!
//! HTTP client for a running routing service, plus an end-to-end check that
//! sends growing synthetic recipient lists and verifies each route table.

mod route_client;

pub use route_client::{
    synthetic_recipients, verify_server, RouteClient, RouteClientConfig, VerifyOutcome,
    SYNTHETIC_PREFIX,
};
