//! Published metadata records.
//!
//! One record is written per serial number:
//!
//! ```json
//! {"image": "ipfs://base/1.jpg", "attributes": [{"trait_type": "Rarity", "value": "Legendary"}]}
//! ```
//!
//! The byte layout (`", "` and `": "` separators, non-ASCII escaped as
//! `\uXXXX`) matches the files produced by earlier allocation runs, so
//! re-running an allocation reproduces published files byte for byte.

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use std::io;

use crate::allocation::Allocation;
use crate::errors::AllocationError;

/// Trait type of the rarity attribute.
pub const RARITY_TRAIT: &str = "Rarity";

/// One `{trait_type, value}` attribute entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name.
    pub trait_type: String,
    /// Attribute value.
    pub value: String,
}

/// Metadata record for a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Artwork reference.
    pub image: String,
    /// Token attributes; currently only the rarity.
    pub attributes: Vec<Attribute>,
}

impl TokenMetadata {
    /// Builds the record for an allocation.
    pub fn for_allocation(allocation: &Allocation, base_image_path: &str) -> Self {
        Self {
            image: image_path(base_image_path, allocation.artwork_id),
            attributes: vec![Attribute {
                trait_type: RARITY_TRAIT.to_string(),
                value: allocation.rarity.clone(),
            }],
        }
    }

    /// Rarity attribute value, if present.
    pub fn rarity(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == RARITY_TRAIT)
            .map(|a| a.value.as_str())
    }

    /// Encodes the record in the published byte layout.
    pub fn to_published_bytes(&self) -> Result<Vec<u8>, AllocationError> {
        let mut out = Vec::with_capacity(128);
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, PublishedFormatter);
        self.serialize(&mut serializer)?;
        Ok(out)
    }

    /// Decodes a record from any valid JSON layout.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AllocationError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Joins `base_image_path` and `{artwork_id}.jpg` with a single `/`.
///
/// An empty base yields the bare file name.
pub fn image_path(base_image_path: &str, artwork_id: u64) -> String {
    if base_image_path.is_empty() || base_image_path.ends_with('/') {
        format!("{}{}.jpg", base_image_path, artwork_id)
    } else {
        format!("{}/{}.jpg", base_image_path, artwork_id)
    }
}

/// Single-line JSON with spaced separators and ASCII-only output.
struct PublishedFormatter;

impl Formatter for PublishedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for c in fragment.chars() {
            if (' '..='~').contains(&c) {
                writer.write_all(&[c as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}
