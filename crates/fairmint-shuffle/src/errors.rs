use std::convert::Infallible;

use thiserror::Error;

/// Errors raised by the permutation engine.
///
/// `InvalidSeed` and `InvalidCount` are input errors: they are detected before
/// any digest is computed and the caller must re-supply the value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShuffleError {
    /// The seed contains a character outside ASCII.
    #[error("seed must be ASCII: found {character:?} at offset {offset}")]
    InvalidSeed {
        /// Character offset of the first non-ASCII character.
        offset: usize,
        /// The offending character.
        character: char,
    },
    /// The token count is zero, negative, or too large.
    #[error("token count must be a positive integer, got {value}")]
    InvalidCount {
        /// Offending value, rendered as text.
        value: String,
    },
    /// A serial number does not fit the computed byte width.
    #[error("serial {serial} does not fit in {width} little-endian bytes")]
    EncodingOverflow {
        /// Serial that could not be encoded.
        serial: u64,
        /// Width the encoding was limited to.
        width: usize,
    },
    /// The caller raised the cancellation flag.
    #[error("shuffle cancelled after {completed} of {total} digests")]
    Cancelled {
        /// Digests computed before the flag was observed.
        completed: u64,
        /// Digests requested.
        total: u64,
    },
}

impl ShuffleError {
    /// Returns `true` for errors caused by the seed or count supplied by the caller.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ShuffleError::InvalidSeed { .. } | ShuffleError::InvalidCount { .. }
        )
    }
}

impl From<Infallible> for ShuffleError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
