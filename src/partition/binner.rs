//! Greedy chunking and tier binning

use super::types::{Bins, Chunks};
use crate::types::Tier;

// ============================================================================
// Partitioner
// ============================================================================

/// Split `items` into full chunks of `size`, left to right
///
/// Leftover elements are returned separately as the remainder, so no
/// placeholder values are ever introduced. A `size` of zero produces no
/// chunks and leaves the whole input in the remainder.
///
/// ```
/// use recipient_router::partition::partition;
///
/// let split = partition(&[1, 2, 3, 4, 5, 6, 7], 3);
/// assert_eq!(split.chunks, vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
/// assert_eq!(split.remainder, &[7]);
/// ```
pub fn partition<T>(items: &[T], size: usize) -> Chunks<'_, T> {
    if size == 0 {
        return Chunks {
            chunks: Vec::new(),
            remainder: items,
        };
    }

    let full = items.len() - items.len() % size;
    let (head, remainder) = items.split_at(full);

    Chunks {
        chunks: head.chunks_exact(size).collect(),
        remainder,
    }
}

// ============================================================================
// Binner
// ============================================================================

/// Split `items` into the four capacity tiers
///
/// Larger tiers are filled first; each smaller tier only sees what the
/// previous one left over. Flattening the result in tier order reproduces
/// the input exactly.
pub fn bin<T>(items: &[T]) -> Bins<'_, T> {
    let Chunks {
        chunks: tier25,
        remainder,
    } = partition(items, Tier::Super.capacity());
    let Chunks {
        chunks: tier10,
        remainder,
    } = partition(remainder, Tier::Large.capacity());
    let Chunks {
        chunks: tier5,
        remainder,
    } = partition(remainder, Tier::Medium.capacity());
    let Chunks {
        chunks: tier1,
        remainder,
    } = partition(remainder, Tier::Small.capacity());

    debug_assert!(remainder.is_empty());
    debug_assert!(tier5.len() <= 1);

    Bins {
        tier25,
        tier10,
        tier5,
        tier1,
    }
}
