//! Subcommand implementations.

pub mod allocate;
pub mod policy;
pub mod shuffle;
pub mod verify;

use fairmint_allocation::RarityPolicy;
use fairmint_shuffle::ShuffleOptions;
use std::path::Path;

use crate::AllocationArgs;

/// Loads the policy file if given, otherwise the default tiers.
pub fn load_policy(path: Option<&Path>) -> Result<RarityPolicy, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(RarityPolicy::from_json_file(path)?),
        None => Ok(RarityPolicy::default()),
    }
}

/// Shuffle options shared by commands that run the engine.
pub fn shuffle_options(args: &AllocationArgs) -> ShuffleOptions {
    ShuffleOptions::default().with_threads(args.threads)
}
