use fairmint_shuffle::{shuffle_with, ShuffleError, ShuffleOptions, TokenCount};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AllocationError;
use crate::rarity::RarityPolicy;

/// Artwork and rarity assigned to one serial number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Position in the shuffled order (0-based).
    pub rank: u64,
    /// Token serial number.
    pub serial: u64,
    /// Artwork id derived from the rank.
    pub artwork_id: u64,
    /// Rarity tier name.
    pub rarity: String,
}

/// Number of serials that landed in one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCount {
    /// Tier name.
    pub name: String,
    /// Serials allocated to the tier.
    pub count: u64,
}

/// Per-tier totals for an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSummary {
    /// Total serials allocated.
    pub total: u64,
    /// Counts in policy order, fallback last. Tiers with no serials are kept.
    pub tiers: Vec<TierCount>,
}

/// Shuffles `1..=count` with `seed` and assigns each rank its artwork and tier.
///
/// The result is in rank order: element `k` has `rank == k`.
pub fn allocate<C>(
    count: C,
    seed: &str,
    policy: &RarityPolicy,
    options: &ShuffleOptions,
) -> Result<Vec<Allocation>, AllocationError>
where
    C: TryInto<TokenCount>,
    ShuffleError: From<C::Error>,
{
    policy.validate()?;
    let order = shuffle_with(count, seed, options)?;

    let allocations = order
        .into_iter()
        .zip(0u64..)
        .map(|(serial, rank)| -> Result<Allocation, AllocationError> {
            let artwork_id = policy.artwork_id(rank);
            Ok(Allocation {
                rank,
                serial,
                artwork_id,
                rarity: policy.rarity_for(artwork_id)?.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(count = allocations.len(), "allocated serials");
    Ok(allocations)
}

/// Counts allocations per tier.
pub fn summarize(allocations: &[Allocation], policy: &RarityPolicy) -> AllocationSummary {
    let mut tiers: Vec<TierCount> = policy
        .tier_names()
        .map(|name| TierCount {
            name: name.to_string(),
            count: 0,
        })
        .collect();

    for allocation in allocations {
        match tiers.iter_mut().find(|t| t.name == allocation.rarity) {
            Some(tier) => tier.count += 1,
            None => tiers.push(TierCount {
                name: allocation.rarity.clone(),
                count: 1,
            }),
        }
    }

    AllocationSummary {
        total: allocations.len() as u64,
        tiers,
    }
}
