//! Capacity checking.
//!
//! Standalone arithmetic utility, independent of the matching pipeline:
//! decide whether a set of weighted loads fits under a capacity limit
//! without ever overflowing the accumulator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A homogeneous batch of items: per-item weight and item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Load {
    /// Weight of a single item.
    pub weight: u64,
    /// Number of items in the batch.
    pub quantity: u64,
}

impl Load {
    /// Create a load.
    pub const fn new(weight: u64, quantity: u64) -> Self {
        Self { weight, quantity }
    }

    /// Total weight of the batch, or `None` on overflow.
    const fn total(self) -> Option<u64> {
        self.weight.checked_mul(self.quantity)
    }
}

/// Whether the summed weight of `loads` fits within `limit`.
///
/// Accumulation is overflow-safe: an intermediate overflow means the total
/// cannot fit under any representable limit, so the answer is `false` rather
/// than a wrapped sum.
pub fn fits_within(loads: &[Load], limit: u64) -> bool {
    loads
        .iter()
        .try_fold(0u64, |acc, load| {
            load.total().and_then(|batch| acc.checked_add(batch))
        })
        .is_some_and(|total| total <= limit)
}
