//! Route assignment
//!
//! Turns binned recipients into the ordered route table. Addresses depend
//! only on a batch's tier and its position within that tier.

use super::types::{Route, RouteTable};
use crate::partition::bin;
use crate::types::Recipient;

/// Build the route table for a recipient list
///
/// Routes come out grouped by tier, largest capacity first, and numbered
/// from 1 within each tier. An empty list yields an empty table.
///
/// ```
/// use recipient_router::routing::route;
///
/// let recipients: Vec<String> = (0..6).map(|i| format!("+1555555{i:04}")).collect();
/// let table = route(&recipients);
///
/// let addresses: Vec<&str> = table.iter().map(|r| r.address.as_str()).collect();
/// assert_eq!(addresses, vec!["10.0.2.1", "10.0.1.1"]);
/// ```
pub fn route(recipients: &[Recipient]) -> RouteTable {
    let bins = bin(recipients);
    let mut table = RouteTable::new();

    for (tier, batches) in bins.iter() {
        for (index, batch) in batches.iter().enumerate() {
            if batch.is_empty() {
                continue;
            }
            table.push(Route::new(tier.address(index + 1), batch.to_vec()));
        }
    }

    tracing::debug!(
        recipients = recipients.len(),
        tier25 = bins.tier25.len(),
        tier10 = bins.tier10.len(),
        tier5 = bins.tier5.len(),
        tier1 = bins.tier1.len(),
        "Binned recipients"
    );

    table
}
