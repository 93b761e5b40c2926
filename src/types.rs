//! Common types used throughout the recipient router
//!
//! Shared type aliases and the capacity tier definitions that the
//! partitioning and routing modules are built on.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// An opaque recipient identifier, usually a phone number
pub type Recipient = String;

/// A contiguous, order-preserving group of recipients
pub type Batch = Vec<Recipient>;

// ============================================================================
// Capacity Tiers
// ============================================================================

/// First two octets shared by every synthetic route address
pub const ADDRESS_BASE: &str = "10.0";

/// Delivery capacity tier
///
/// Each tier delivers a fixed number of recipients per transaction and
/// owns one subnet of the synthetic address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// 25 recipients per transaction, subnet `10.0.4.x`
    Super,
    /// 10 recipients per transaction, subnet `10.0.3.x`
    Large,
    /// 5 recipients per transaction, subnet `10.0.2.x`
    Medium,
    /// 1 recipient per transaction, subnet `10.0.1.x`
    Small,
}

impl Tier {
    /// All tiers, largest capacity first
    pub const ALL: [Tier; 4] = [Tier::Super, Tier::Large, Tier::Medium, Tier::Small];

    /// Maximum batch size for this tier
    pub const fn capacity(self) -> usize {
        match self {
            Tier::Super => 25,
            Tier::Large => 10,
            Tier::Medium => 5,
            Tier::Small => 1,
        }
    }

    /// Third octet of the addresses assigned to this tier
    pub const fn subnet(self) -> u8 {
        match self {
            Tier::Super => 4,
            Tier::Large => 3,
            Tier::Medium => 2,
            Tier::Small => 1,
        }
    }

    /// Look up a tier by its subnet octet
    pub fn from_subnet(subnet: u8) -> Option<Tier> {
        Self::ALL.into_iter().find(|t| t.subnet() == subnet)
    }

    /// Address prefix for this tier, e.g. `10.0.4.`
    pub fn prefix(self) -> String {
        format!("{ADDRESS_BASE}.{}.", self.subnet())
    }

    /// Address of the batch at `index` (1-based) within this tier
    pub fn address(self, index: usize) -> String {
        format!("{ADDRESS_BASE}.{}.{index}", self.subnet())
    }

    /// Human-readable tier name
    pub const fn label(self) -> &'static str {
        match self {
            Tier::Super => "super",
            Tier::Large => "large",
            Tier::Medium => "medium",
            Tier::Small => "small",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.capacity())
    }
}
