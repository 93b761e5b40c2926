//! Route table types
//!
//! These are the wire types of the routing endpoint: a route serializes as
//! `{"ip": ..., "recipients": [...]}` and a table as a plain JSON array.

use crate::types::{Batch, Recipient, Tier, ADDRESS_BASE};
use serde::{Deserialize, Serialize};

/// A synthetic address paired with the batch sent through it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Dotted-quad address, e.g. `10.0.3.1`
    #[serde(rename = "ip")]
    pub address: String,
    /// Recipients delivered through this address
    pub recipients: Batch,
}

impl Route {
    /// Create a new route
    pub fn new(address: impl Into<String>, recipients: Batch) -> Self {
        Self {
            address: address.into(),
            recipients,
        }
    }

    /// Tier implied by the address, if it is a well-formed route address
    pub fn tier(&self) -> Option<Tier> {
        let rest = self.address.strip_prefix(ADDRESS_BASE)?.strip_prefix('.')?;
        let (subnet, index) = rest.split_once('.')?;

        let index: usize = canonical(index)?;
        if index == 0 {
            return None;
        }
        Tier::from_subnet(canonical(subnet)?)
    }

    /// Number of recipients in this route
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// True if the route carries no recipients
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}

/// Parse a decimal octet, rejecting signs and leading zeros
fn canonical<T: std::str::FromStr + ToString>(raw: &str) -> Option<T> {
    let value: T = raw.parse().ok()?;
    (value.to_string() == raw).then_some(value)
}

/// Ordered list of routes for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable(Vec<Route>);

impl RouteTable {
    /// Create an empty route table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route
    pub fn push(&mut self, route: Route) {
        self.0.push(route);
    }

    /// Routes in table order
    pub fn routes(&self) -> &[Route] {
        &self.0
    }

    /// Iterate over routes
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.0.iter()
    }

    /// Number of routes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the table has no routes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All recipients in table order
    pub fn recipients(&self) -> impl Iterator<Item = &Recipient> {
        self.0.iter().flat_map(|route| route.recipients.iter())
    }

    /// Count routes per tier, ignoring routes with unrecognized addresses
    pub fn tier_counts(&self) -> TierCounts {
        let mut counts = TierCounts::default();
        for tier in self.0.iter().filter_map(Route::tier) {
            counts.increment(tier);
        }
        counts
    }
}

impl From<Vec<Route>> for RouteTable {
    fn from(routes: Vec<Route>) -> Self {
        Self(routes)
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for RouteTable {
    type Item = Route;
    type IntoIter = std::vec::IntoIter<Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Number of routes in each tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    /// Routes of 25 recipients
    pub tier25: usize,
    /// Routes of 10 recipients
    pub tier10: usize,
    /// Routes of 5 recipients
    pub tier5: usize,
    /// Routes of 1 recipient
    pub tier1: usize,
}

impl TierCounts {
    /// Counts the greedy binning produces for `recipients` entries
    pub fn expected(recipients: usize) -> Self {
        let mut remaining = recipients;
        let mut counts = Self::default();
        for tier in Tier::ALL {
            *counts.get_mut(tier) = remaining / tier.capacity();
            remaining %= tier.capacity();
        }
        counts
    }

    /// Count for one tier
    pub fn get(&self, tier: Tier) -> usize {
        match tier {
            Tier::Super => self.tier25,
            Tier::Large => self.tier10,
            Tier::Medium => self.tier5,
            Tier::Small => self.tier1,
        }
    }

    fn get_mut(&mut self, tier: Tier) -> &mut usize {
        match tier {
            Tier::Super => &mut self.tier25,
            Tier::Large => &mut self.tier10,
            Tier::Medium => &mut self.tier5,
            Tier::Small => &mut self.tier1,
        }
    }

    /// Add one route to a tier
    pub fn increment(&mut self, tier: Tier) {
        *self.get_mut(tier) += 1;
    }

    /// Total routes across tiers
    pub fn total(&self) -> usize {
        self.tier25 + self.tier10 + self.tier5 + self.tier1
    }
}

/// Body of a successful routing response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Banner or echoed message
    pub message: String,
    /// Route table for the request's recipients
    pub routes: RouteTable,
}
