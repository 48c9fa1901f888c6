use serde::{Serialize, Serializer};
use sha2::{Digest as Sha2Digest, Sha256};
use std::cmp::Ordering;
use std::fmt;

use crate::encoding::encode_serial;
use crate::errors::ShuffleError;
use crate::seed::Seed;

/// SHA-256 digest of `seed || le_bytes(serial)`, paired with its serial.
///
/// Ordering is by digest bytes, then by serial. Lowercase hex preserves byte
/// order, so this is the same order as comparing the hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerialDigest {
    serial: u64,
    bytes: [u8; 32],
}

impl SerialDigest {
    /// Serial number the digest was computed for.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Raw digest bytes.
    pub fn bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Lowercase hex rendering, the form published for audits.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl Ord for SerialDigest {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes
            .cmp(&other.bytes)
            .then(self.serial.cmp(&other.serial))
    }
}

impl PartialOrd for SerialDigest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SerialDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for SerialDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SerialDigest", 2)?;
        state.serialize_field("serial", &self.serial)?;
        state.serialize_field("digest", &self.to_hex())?;
        state.end()
    }
}

/// Computes the digest for one serial.
///
/// Formula: `sha256(seed_bytes || le_bytes(serial, width))`
pub fn serial_digest(seed: &Seed, serial: u64, width: usize) -> Result<SerialDigest, ShuffleError> {
    let encoded = encode_serial(serial, width)?;

    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.update(&encoded);

    Ok(SerialDigest {
        serial,
        bytes: hasher.finalize().into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_published_digest() {
        let seed = Seed::parse("test").unwrap();
        let digest = serial_digest(&seed, 1, 2).unwrap();
        assert_eq!(
            digest.to_hex(),
            "eb0a66664348de9b84f3b5fd4567ebe9b9a00dd283f81f4cb189060dc4c23894"
        );
        assert_eq!(digest.serial(), 1);
    }

    #[test]
    fn width_changes_the_digest() {
        let seed = Seed::parse("test").unwrap();
        let narrow = serial_digest(&seed, 1, 2).unwrap();
        let wide = serial_digest(&seed, 1, 3).unwrap();
        assert_ne!(narrow.bytes(), wide.bytes());
    }

    #[test]
    fn byte_order_equals_hex_order() {
        let seed = Seed::parse("ordering").unwrap();
        let digests: Vec<_> = (1..=64)
            .map(|serial| serial_digest(&seed, serial, 2).unwrap())
            .collect();

        let mut by_bytes = digests.clone();
        by_bytes.sort();
        let mut by_hex = digests;
        by_hex.sort_by_key(|d| d.to_hex());

        assert_eq!(by_bytes, by_hex);
    }

    #[test]
    fn equal_digests_fall_back_to_serial() {
        let a = SerialDigest {
            serial: 9,
            bytes: [7; 32],
        };
        let b = SerialDigest {
            serial: 2,
            bytes: [7; 32],
        };
        assert!(b < a);
    }

    #[test]
    fn serializes_as_serial_and_hex() {
        let seed = Seed::parse("test").unwrap();
        let digest = serial_digest(&seed, 3, 2).unwrap();
        assert_eq!(
            serde_json::to_string(&digest).unwrap(),
            r#"{"serial":3,"digest":"100a380427a2a6100e4656ca92c0d20c8a11bd9d139560f1f26362010470ed45"}"#
        );
    }
}
