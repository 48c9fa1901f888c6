use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ShuffleError;

/// A validated, lowercased shuffle seed.
///
/// The seed is public: it acts as the commitment that lets anyone re-derive
/// the permutation. Only ASCII input is accepted and only ASCII letters are
/// folded to lowercase; whitespace and punctuation are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed(String);

impl Seed {
    /// Validates `value` and normalizes it to lowercase.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ShuffleError> {
        let value = value.as_ref();
        if let Some((offset, character)) = value.chars().enumerate().find(|(_, c)| !c.is_ascii()) {
            return Err(ShuffleError::InvalidSeed { offset, character });
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    /// Bytes hashed in front of every serial encoding.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Normalized seed text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Seed {
    type Error = ShuffleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Seed::parse(value)
    }
}

impl TryFrom<&str> for Seed {
    type Error = ShuffleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Seed::parse(value)
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

impl AsRef<str> for Seed {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
