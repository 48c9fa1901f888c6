use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::errors::AllocationError;

/// How a rank maps to an artwork id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankBase {
    /// Artwork ids start at 1: rank 0 gets artwork 1.
    #[default]
    One,
    /// Artwork id equals rank: rank 0 gets artwork 0.
    Zero,
}

/// A tier covering artwork ids up to and including `last_artwork_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityTier {
    /// Name written into the metadata (e.g. `Epic`).
    pub name: String,
    /// Highest artwork id that belongs to this tier.
    pub last_artwork_id: u64,
}

impl RarityTier {
    /// Creates a tier.
    pub fn new(name: impl Into<String>, last_artwork_id: u64) -> Self {
        Self {
            name: name.into(),
            last_artwork_id,
        }
    }
}

/// Monotone threshold table mapping ranks to rarity tiers.
///
/// Tiers are checked in order; an artwork id past the last tier gets the
/// `fallback` name. The default table is one Legendary, twenty Epic, five
/// hundred Rare and Common for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityPolicy {
    /// Rank to artwork id convention.
    #[serde(default)]
    pub rank_base: RankBase,
    /// Tiers in ascending `last_artwork_id` order.
    pub tiers: Vec<RarityTier>,
    /// Tier name for artwork ids beyond the last tier.
    pub fallback: String,
}

impl Default for RarityPolicy {
    fn default() -> Self {
        Self {
            rank_base: RankBase::One,
            tiers: vec![
                RarityTier::new("Legendary", 1),
                RarityTier::new("Epic", 21),
                RarityTier::new("Rare", 521),
            ],
            fallback: "Common".to_string(),
        }
    }
}

impl RarityPolicy {
    /// Loads and validates a policy from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AllocationError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| AllocationError::io(path, e))?;
        let policy: RarityPolicy =
            serde_json::from_str(&raw).map_err(|source| AllocationError::PolicyFile {
                path: path.to_path_buf(),
                source,
            })?;
        policy.validate()?;
        Ok(policy)
    }

    /// Checks that tier names are present and unique and that thresholds
    /// strictly increase.
    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.fallback.trim().is_empty() {
            return Err(AllocationError::InvalidPolicy(
                "fallback tier name is empty".into(),
            ));
        }
        for (idx, tier) in self.tiers.iter().enumerate() {
            if tier.name.trim().is_empty() {
                return Err(AllocationError::InvalidPolicy(format!(
                    "tier {} has an empty name",
                    idx
                )));
            }
            if self.rank_base == RankBase::One && tier.last_artwork_id == 0 {
                return Err(AllocationError::InvalidPolicy(format!(
                    "tier {} ends at artwork 0 but artwork ids start at 1",
                    tier.name
                )));
            }
        }
        let mut seen = HashSet::new();
        if let Some(name) = self.tier_names().find(|name| !seen.insert(*name)) {
            return Err(AllocationError::InvalidPolicy(format!(
                "tier name {} is used more than once",
                name
            )));
        }
        for pair in self.tiers.windows(2) {
            if pair[1].last_artwork_id <= pair[0].last_artwork_id {
                return Err(AllocationError::InvalidPolicy(format!(
                    "tier {} (ends at {}) must end after tier {} (ends at {})",
                    pair[1].name, pair[1].last_artwork_id, pair[0].name, pair[0].last_artwork_id
                )));
            }
        }
        Ok(())
    }

    /// Artwork id assigned to `rank`.
    pub fn artwork_id(&self, rank: u64) -> u64 {
        match self.rank_base {
            RankBase::One => rank + 1,
            RankBase::Zero => rank,
        }
    }

    /// Tier name for an artwork id.
    pub fn rarity_for(&self, artwork_id: u64) -> Result<&str, AllocationError> {
        if self.rank_base == RankBase::One && artwork_id == 0 {
            return Err(AllocationError::UnsupportedArtwork { artwork_id });
        }
        Ok(self
            .tiers
            .iter()
            .find(|tier| artwork_id <= tier.last_artwork_id)
            .map_or(self.fallback.as_str(), |tier| tier.name.as_str()))
    }

    /// Tier names in table order, fallback last.
    pub fn tier_names(&self) -> impl Iterator<Item = &str> {
        self.tiers
            .iter()
            .map(|tier| tier.name.as_str())
            .chain(std::iter::once(self.fallback.as_str()))
    }
}
