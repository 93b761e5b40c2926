//! Recipient partitioning module
//!
//! # Overview
//!
//! Recipients are packed greedily into delivery batches:
//! - `partition` cuts a sequence into full fixed-size chunks plus a remainder
//! - `bin` applies that cut at 25, 10, 5 and 1 in turn, so larger batches are
//!   always preferred and input order is preserved across the tiers
//!
//! Both functions are pure and work on borrowed slices.

mod binner;
mod types;

pub use binner::{bin, partition};
pub use types::{Bins, Chunks};
