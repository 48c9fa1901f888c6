//! Metadata directory writer.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::allocation::Allocation;
use crate::errors::AllocationError;
use crate::metadata::TokenMetadata;

/// Options for metadata writing.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Replace files that already exist (default: false).
    pub overwrite: bool,
    /// Whether to fsync each file after writing (default: false).
    pub sync: bool,
}

/// Writes one metadata file per serial into a directory.
///
/// Files are named by serial number with no extension (`<dir>/42`).
///
/// # Example
///
/// ```rust
/// use fairmint_allocation::{allocate, MetadataWriter, RarityPolicy, WriteOptions};
/// use fairmint_shuffle::ShuffleOptions;
///
/// let dir = tempfile::TempDir::new()?;
/// let allocations = allocate(5, "test", &RarityPolicy::default(), &ShuffleOptions::default())?;
///
/// let mut writer = MetadataWriter::open(dir.path(), "ipfs://QmBase", WriteOptions::default())?;
/// writer.write_all(&allocations)?;
/// assert_eq!(writer.finish(), 5);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct MetadataWriter {
    dir: PathBuf,
    base_image_path: String,
    options: WriteOptions,
    written: u64,
}

impl MetadataWriter {
    /// Opens `dir` for writing, creating it and its parents if missing.
    pub fn open(
        dir: impl AsRef<Path>,
        base_image_path: impl Into<String>,
        options: WriteOptions,
    ) -> Result<Self, AllocationError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| AllocationError::io(&dir, e))?;
        Ok(Self {
            dir,
            base_image_path: base_image_path.into(),
            options,
            written: 0,
        })
    }

    /// Path the record for `serial` is written to.
    pub fn path_for(&self, serial: u64) -> PathBuf {
        self.dir.join(serial.to_string())
    }

    /// Writes the record for one allocation and returns its path.
    pub fn write(&mut self, allocation: &Allocation) -> Result<PathBuf, AllocationError> {
        let metadata = TokenMetadata::for_allocation(allocation, &self.base_image_path);
        let bytes = metadata.to_published_bytes()?;
        let path = self.path_for(allocation.serial);

        let mut open = OpenOptions::new();
        open.write(true);
        if self.options.overwrite {
            open.create(true).truncate(true);
        } else {
            open.create_new(true);
        }
        let mut file = open.open(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                AllocationError::FileExists { path: path.clone() }
            } else {
                AllocationError::io(&path, e)
            }
        })?;

        file.write_all(&bytes)
            .map_err(|e| AllocationError::io(&path, e))?;
        if self.options.sync {
            file.sync_all().map_err(|e| AllocationError::io(&path, e))?;
        }

        debug!(serial = allocation.serial, path = %path.display(), "wrote metadata");
        self.written += 1;
        Ok(path)
    }

    /// Writes every allocation, stopping at the first failure.
    ///
    /// Without `overwrite`, every target path is checked first; if any record
    /// already exists nothing is written.
    pub fn write_all(&mut self, allocations: &[Allocation]) -> Result<(), AllocationError> {
        if !self.options.overwrite {
            for allocation in allocations {
                let path = self.path_for(allocation.serial);
                match fs::symlink_metadata(&path) {
                    Ok(_) => return Err(AllocationError::FileExists { path }),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(AllocationError::io(&path, e)),
                }
            }
        }
        for allocation in allocations {
            self.write(allocation)?;
        }
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Consumes the writer and returns the number of records written.
    pub fn finish(self) -> u64 {
        self.written
    }
}
