//! Allocation of rarity tiers and artwork to shuffled serial numbers.
//!
//! This crate provides:
//! - A configurable rank → rarity policy table ([`RarityPolicy`])
//! - The allocation itself: shuffled serials zipped with artwork ids and tiers
//! - Per-serial metadata records in the published JSON layout
//! - A directory writer for those records and an audit verifier that
//!   re-derives an allocation and checks a published directory against it
//!
//! ## Quick Start
//!
//! ```rust
//! use fairmint_allocation::{allocate, RarityPolicy};
//! use fairmint_shuffle::ShuffleOptions;
//!
//! let allocations = allocate(5, "test", &RarityPolicy::default(), &ShuffleOptions::default())?;
//! assert_eq!(allocations[0].serial, 3);
//! assert_eq!(allocations[0].rarity, "Legendary");
//! # Ok::<(), fairmint_allocation::AllocationError>(())
//! ```
//!
#![deny(missing_docs)]

/// Allocation records and tier summaries.
pub mod allocation;
/// Error types for allocation operations.
pub mod errors;
/// Published metadata records.
pub mod metadata;
/// Rank → rarity policy.
pub mod rarity;
/// Audit verification of published metadata directories.
pub mod verify;
/// Metadata directory writer.
pub mod writer;

pub use allocation::{allocate, summarize, Allocation, AllocationSummary, TierCount};
pub use errors::AllocationError;
pub use metadata::{image_path, Attribute, TokenMetadata};
pub use rarity::{RankBase, RarityPolicy, RarityTier};
pub use verify::{verify_directory, SerialVerdict, Verdict, VerificationReport};
pub use writer::{MetadataWriter, WriteOptions};
