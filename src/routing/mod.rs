//! Routing module
//!
//! Assigns each recipient batch a synthetic address drawn from the tiered
//! `10.0.{tier}.{index}` scheme, and verifies tables produced elsewhere.
//!
//! | Tier   | Capacity | Subnet     |
//! |--------|----------|------------|
//! | super  | 25       | `10.0.4.x` |
//! | large  | 10       | `10.0.3.x` |
//! | medium | 5        | `10.0.2.x` |
//! | small  | 1        | `10.0.1.x` |

mod router;
mod types;
mod verify;

pub use router::route;
pub use types::{Route, RouteResponse, RouteTable, TierCounts};
pub use verify::verify_routes;
