//! Route table verification
//!
//! Checks a route table received from a server against the counts the
//! greedy binning must produce for a given number of recipients.

use super::types::{RouteTable, TierCounts};
use crate::error::{Error, Result};
use crate::types::Tier;

/// Verify `routes` is a correct table for `recipients` recipients
///
/// Each route is classified by the third octet of its address. Routes must
/// appear largest tier first, and each tier's addresses must count up from
/// `.1` with no gaps or repeats. Unknown or non-canonical addresses, wrong
/// batch sizes, and tier counts that differ from [`TierCounts::expected`]
/// are all reported as verification errors.
pub fn verify_routes(recipients: usize, routes: &RouteTable) -> Result<TierCounts> {
    let mut observed = TierCounts::default();
    let mut previous: Option<Tier> = None;

    for route in routes {
        let tier = route.tier().ok_or_else(|| {
            Error::verification(recipients, format!("invalid address '{}'", route.address))
        })?;

        if let Some(prev) = previous {
            if tier.capacity() > prev.capacity() {
                return Err(Error::verification(
                    recipients,
                    format!(
                        "route {} ({}) follows a {} route",
                        route.address,
                        tier.label(),
                        prev.label()
                    ),
                ));
            }
        }
        previous = Some(tier);

        if route.len() != tier.capacity() {
            return Err(Error::verification(
                recipients,
                format!(
                    "route {} carries {} recipients, {} routes carry {}",
                    route.address,
                    route.len(),
                    tier.label(),
                    tier.capacity()
                ),
            ));
        }

        let expected_address = tier.address(observed.get(tier) + 1);
        if route.address != expected_address {
            return Err(Error::verification(
                recipients,
                format!("expected address {expected_address}, received {}", route.address),
            ));
        }

        observed.increment(tier);
    }

    let expected = TierCounts::expected(recipients);
    for tier in Tier::ALL {
        if observed.get(tier) != expected.get(tier) {
            return Err(Error::verification(
                recipients,
                format!(
                    "expected {} {} routes, received {}",
                    expected.get(tier),
                    tier.label(),
                    observed.get(tier)
                ),
            ));
        }
    }

    Ok(observed)
}
