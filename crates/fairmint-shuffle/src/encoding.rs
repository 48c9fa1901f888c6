//! Serial-number encoding.
//!
//! Each serial is hashed as `byte_width(N)` little-endian bytes where
//! `byte_width(N) = ceil(log2(N)) / 8 + 2` (integer division). The width is
//! part of the public commitment: a different width yields a different
//! permutation, so it must not be replaced by a fixed size.

use crate::count::TokenCount;
use crate::errors::ShuffleError;

/// `ceil(log2(n))` in exact integer arithmetic. `n` must be non-zero.
fn ceil_log2(n: u64) -> u32 {
    if n <= 1 {
        0
    } else {
        u64::BITS - (n - 1).leading_zeros()
    }
}

/// Number of little-endian bytes used to encode every serial in `1..=count`.
pub fn byte_width(count: TokenCount) -> usize {
    ceil_log2(count.get()) as usize / 8 + 2
}

/// Encodes `serial` as exactly `width` little-endian bytes.
///
/// Widths beyond eight bytes are zero-padded. Fails with
/// [`ShuffleError::EncodingOverflow`] if the serial needs more than `width` bytes.
pub fn encode_serial(serial: u64, width: usize) -> Result<Vec<u8>, ShuffleError> {
    let le = serial.to_le_bytes();
    let significant = le.len() - (serial.leading_zeros() / 8) as usize;
    if significant > width {
        return Err(ShuffleError::EncodingOverflow { serial, width });
    }

    let mut bytes = vec![0u8; width];
    bytes[..significant].copy_from_slice(&le[..significant]);
    Ok(bytes)
}
