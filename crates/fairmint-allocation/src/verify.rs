//! Audit verification.
//!
//! An auditor holding the public seed and token count re-derives the
//! allocation and compares it against the published metadata directory.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::allocation::Allocation;
use crate::errors::AllocationError;
use crate::metadata::TokenMetadata;

/// Outcome for a single serial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// The published record matches.
    Ok,
    /// No file exists for the serial.
    Missing,
    /// The file parses but differs from the expected record.
    Mismatch {
        /// Record derived from the seed.
        expected: TokenMetadata,
        /// Record found on disk.
        found: TokenMetadata,
    },
    /// The file exists but could not be read or parsed.
    Unreadable {
        /// Why reading failed.
        reason: String,
    },
}

/// Verdict for one serial, with its rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerialVerdict {
    /// Token serial number.
    pub serial: u64,
    /// Rank the serial was expected to have.
    pub rank: u64,
    /// Comparison outcome.
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Result of checking a metadata directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Verdicts in serial order.
    pub verdicts: Vec<SerialVerdict>,
    /// Directory entries that are not a serial of this allocation.
    pub unexpected: Vec<String>,
}

impl VerificationReport {
    /// Returns `true` when every serial matches and nothing extra was found.
    pub fn is_ok(&self) -> bool {
        self.unexpected.is_empty() && self.verdicts.iter().all(|v| v.verdict == Verdict::Ok)
    }

    /// Verdicts other than [`Verdict::Ok`].
    pub fn failures(&self) -> impl Iterator<Item = &SerialVerdict> {
        self.verdicts.iter().filter(|v| v.verdict != Verdict::Ok)
    }
}

/// Compares the files in `dir` against `allocations`.
///
/// Fails only if `dir` itself cannot be listed; per-file problems are
/// reported as verdicts.
pub fn verify_directory(
    dir: impl AsRef<Path>,
    allocations: &[Allocation],
    base_image_path: &str,
) -> Result<VerificationReport, AllocationError> {
    let dir = dir.as_ref();

    let mut verdicts: Vec<SerialVerdict> = allocations
        .iter()
        .map(|allocation| {
            let expected = TokenMetadata::for_allocation(allocation, base_image_path);
            let verdict = check_file(&dir.join(allocation.serial.to_string()), expected);
            if verdict != Verdict::Ok {
                warn!(serial = allocation.serial, ?verdict, "metadata does not match");
            }
            SerialVerdict {
                serial: allocation.serial,
                rank: allocation.rank,
                verdict,
            }
        })
        .collect();
    verdicts.sort_by_key(|v| v.serial);

    let serials: BTreeSet<String> = allocations.iter().map(|a| a.serial.to_string()).collect();
    let mut unexpected = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| AllocationError::io(dir, e))? {
        let entry = entry.map_err(|e| AllocationError::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !serials.contains(&name) {
            unexpected.push(name);
        }
    }
    unexpected.sort();

    Ok(VerificationReport {
        verdicts,
        unexpected,
    })
}

fn check_file(path: &Path, expected: TokenMetadata) -> Verdict {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Verdict::Missing,
        Err(e) => {
            return Verdict::Unreadable {
                reason: e.to_string(),
            }
        }
    };

    match TokenMetadata::from_slice(&bytes) {
        Ok(found) if found == expected => Verdict::Ok,
        Ok(found) => Verdict::Mismatch { expected, found },
        Err(e) => Verdict::Unreadable {
            reason: e.to_string(),
        },
    }
}
