//! Seed-driven permutation of token serial numbers.
//!
//! This crate provides:
//! - Seed and token-count newtypes that reject malformed input up front
//! - The serial-number byte encoding (`ceil(log2(N)) / 8 + 2` little-endian bytes)
//! - Per-serial SHA-256 digests over `seed || le_bytes(serial)`
//! - The shuffle itself: serials `1..=N` ordered by ascending digest
//!
//! Core invariants:
//! - The output is a pure function of `(N, seed)`; anyone holding both can re-derive it
//! - The output is a permutation of `1..=N`
//! - Seeds are ASCII and lowercased before hashing; nothing else is normalized
//!
//! ## Quick Start
//!
//! ```rust
//! use fairmint_shuffle::shuffle;
//!
//! let order = shuffle(5, "test")?;
//! assert_eq!(order, vec![3, 4, 5, 2, 1]);
//! # Ok::<(), fairmint_shuffle::ShuffleError>(())
//! ```
//!
#![deny(missing_docs)]

/// Token count newtype.
pub mod count;
/// Per-serial digests used as sort keys.
pub mod digest;
/// Little-endian serial encoding and the byte-width rule.
pub mod encoding;
/// Error type for the permutation engine.
pub mod errors;
/// Seed validation and normalization.
pub mod seed;
/// The shuffle and its options.
pub mod shuffle;

pub use count::TokenCount;
pub use digest::{serial_digest, SerialDigest};
pub use encoding::{byte_width, encode_serial};
pub use errors::ShuffleError;
pub use seed::Seed;
pub use shuffle::{ranked_digests, shuffle, shuffle_with, ShuffleOptions};
