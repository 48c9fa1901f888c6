use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

use crate::errors::ShuffleError;

/// Number of tokens to permute. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TokenCount(NonZeroU64);

impl TokenCount {
    /// Creates a count, rejecting zero.
    pub fn new(value: u64) -> Result<Self, ShuffleError> {
        NonZeroU64::new(value)
            .map(Self)
            .ok_or_else(|| ShuffleError::InvalidCount {
                value: value.to_string(),
            })
    }

    /// The count as a plain integer.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl From<TokenCount> for u64 {
    fn from(count: TokenCount) -> Self {
        count.get()
    }
}

impl fmt::Display for TokenCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! try_from_int {
    ($($int:ty),*) => {
        $(
            impl TryFrom<$int> for TokenCount {
                type Error = ShuffleError;

                fn try_from(value: $int) -> Result<Self, Self::Error> {
                    let value = u64::try_from(value).map_err(|_| ShuffleError::InvalidCount {
                        value: value.to_string(),
                    })?;
                    TokenCount::new(value)
                }
            }
        )*
    };
}

try_from_int!(i32, i64, i128, u32, u128, usize);

impl TryFrom<u64> for TokenCount {
    type Error = ShuffleError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        TokenCount::new(value)
    }
}
