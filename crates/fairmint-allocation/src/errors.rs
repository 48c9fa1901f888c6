use fairmint_shuffle::ShuffleError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while allocating or persisting metadata.
#[derive(Error, Debug)]
pub enum AllocationError {
    /// The permutation engine rejected its input.
    #[error(transparent)]
    Shuffle(#[from] ShuffleError),
    /// The rarity policy is malformed.
    #[error("invalid rarity policy: {0}")]
    InvalidPolicy(String),
    /// An artwork id has no rarity under the active policy.
    #[error("artwork id {artwork_id} is not supported")]
    UnsupportedArtwork {
        /// Offending artwork id.
        artwork_id: u64,
    },
    /// A policy file could not be parsed.
    #[error("failed to parse policy file {}: {source}", path.display())]
    PolicyFile {
        /// Path of the policy file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// Refused to overwrite an existing metadata file.
    #[error("{} already exists", path.display())]
    FileExists {
        /// Path that already exists.
        path: PathBuf,
    },
    /// I/O error on a specific path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AllocationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AllocationError::Io {
            path: path.into(),
            source,
        }
    }
}
