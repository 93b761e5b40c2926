//! Partition types
//!
//! Borrowed views over an input sequence. Nothing here copies recipients;
//! every chunk is a slice of the caller's data.

use crate::types::Tier;

/// Result of splitting a sequence into fixed-size chunks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunks<'a, T> {
    /// Full-size chunks, in input order
    pub chunks: Vec<&'a [T]>,
    /// Trailing elements that did not fill a chunk
    pub remainder: &'a [T],
}

impl<'a, T> Chunks<'a, T> {
    /// Chunks with no remainder
    pub fn is_exact(&self) -> bool {
        self.remainder.is_empty()
    }

    /// Total number of elements across chunks and remainder
    pub fn len(&self) -> usize {
        self.chunks.iter().map(|c| c.len()).sum::<usize>() + self.remainder.len()
    }

    /// True when there are no chunks and no remainder
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty() && self.remainder.is_empty()
    }
}

/// A sequence split into the four capacity tiers
///
/// Every batch in a tier has exactly that tier's capacity. `tier5` holds at
/// most one batch and `tier1` at most four.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bins<'a, T> {
    /// Batches of 25
    pub tier25: Vec<&'a [T]>,
    /// Batches of 10
    pub tier10: Vec<&'a [T]>,
    /// Batches of 5
    pub tier5: Vec<&'a [T]>,
    /// Batches of 1
    pub tier1: Vec<&'a [T]>,
}

impl<'a, T> Bins<'a, T> {
    /// Batches belonging to a tier
    pub fn batches(&self, tier: Tier) -> &[&'a [T]] {
        match tier {
            Tier::Super => &self.tier25,
            Tier::Large => &self.tier10,
            Tier::Medium => &self.tier5,
            Tier::Small => &self.tier1,
        }
    }

    /// Iterate tiers in descending capacity order with their batches
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[&'a [T]])> + '_ {
        Tier::ALL.into_iter().map(move |tier| (tier, self.batches(tier)))
    }

    /// Total number of batches across all tiers
    pub fn batch_count(&self) -> usize {
        self.iter().map(|(_, batches)| batches.len()).sum()
    }

    /// All elements, tiers concatenated largest first
    pub fn flatten(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.iter()
            .flat_map(|(_, batches)| batches.iter().copied().flat_map(|batch| batch.iter()))
    }
}
