//! The permutation engine.
//!
//! `shuffle(N, seed)` hashes every serial in `1..=N` and returns the serials
//! ordered by ascending digest. Position `k` of the result is the serial that
//! receives rank `k`.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tracing::debug;

use crate::count::TokenCount;
use crate::digest::{serial_digest, SerialDigest};
use crate::encoding::byte_width;
use crate::errors::ShuffleError;
use crate::seed::Seed;

/// Options for [`shuffle_with`] and [`ranked_digests`].
///
/// None of the options affect the result, only how it is computed.
#[derive(Debug, Clone)]
pub struct ShuffleOptions {
    /// Worker threads used to compute digests (default: 1).
    pub threads: NonZeroUsize,
    /// Flag checked between digests; once set the shuffle stops with
    /// [`ShuffleError::Cancelled`].
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for ShuffleOptions {
    fn default() -> Self {
        Self {
            threads: NonZeroUsize::MIN,
            cancel: None,
        }
    }
}

impl ShuffleOptions {
    /// Sets the worker thread count.
    pub fn with_threads(mut self, threads: NonZeroUsize) -> Self {
        self.threads = threads;
        self
    }

    /// Installs a cancellation flag.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Shuffles the serials `1..=count` using `seed`.
///
/// The seed must be ASCII; it is lowercased before hashing. The count must be
/// positive.
///
/// # Example
///
/// ```rust
/// use fairmint_shuffle::shuffle;
///
/// let upper = shuffle(10, "ABC")?;
/// let lower = shuffle(10, "abc")?;
/// assert_eq!(upper, lower);
/// assert_eq!(lower, vec![3, 4, 5, 6, 10, 2, 8, 7, 9, 1]);
/// # Ok::<(), fairmint_shuffle::ShuffleError>(())
/// ```
///
/// # Errors
///
/// Returns [`ShuffleError::InvalidSeed`] or [`ShuffleError::InvalidCount`]
/// before any digest is computed.
pub fn shuffle<C>(count: C, seed: &str) -> Result<Vec<u64>, ShuffleError>
where
    C: TryInto<TokenCount>,
    ShuffleError: From<C::Error>,
{
    shuffle_with(count, seed, &ShuffleOptions::default())
}

/// [`shuffle`] with explicit [`ShuffleOptions`].
pub fn shuffle_with<C>(
    count: C,
    seed: &str,
    options: &ShuffleOptions,
) -> Result<Vec<u64>, ShuffleError>
where
    C: TryInto<TokenCount>,
    ShuffleError: From<C::Error>,
{
    let digests = ranked_digests(count, seed, options)?;
    Ok(digests.into_iter().map(|d| d.serial()).collect())
}

/// Computes every serial digest and returns them in rank order.
///
/// This is the audit view of [`shuffle`]: element `k` carries the serial with
/// rank `k` together with the digest that put it there.
pub fn ranked_digests<C>(
    count: C,
    seed: &str,
    options: &ShuffleOptions,
) -> Result<Vec<SerialDigest>, ShuffleError>
where
    C: TryInto<TokenCount>,
    ShuffleError: From<C::Error>,
{
    let seed = Seed::parse(seed)?;
    let count = count.try_into()?;
    let total = count.get();
    let width = byte_width(count);
    let threads = usize::try_from(total)
        .map_or(options.threads.get(), |t| t.min(options.threads.get()));
    let cancel = options.cancel.as_deref();

    debug!(count = total, width, threads, "computing serial digests");

    let mut digests = if threads <= 1 {
        digest_range(&seed, 1, total, width, cancel).map_err(|e| e.into_error(total))?
    } else {
        digest_parallel(&seed, total, width, threads, cancel)?
    };

    // Total order: digest bytes, then serial.
    digests.sort_unstable();
    Ok(digests)
}

/// Failure of one contiguous range of serials.
enum RangeError {
    Cancelled { completed: u64 },
    Failed(ShuffleError),
}

impl RangeError {
    fn into_error(self, total: u64) -> ShuffleError {
        match self {
            RangeError::Cancelled { completed } => ShuffleError::Cancelled { completed, total },
            RangeError::Failed(err) => err,
        }
    }
}

fn digest_range(
    seed: &Seed,
    first: u64,
    last: u64,
    width: usize,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<SerialDigest>, RangeError> {
    let mut digests = Vec::with_capacity(usize::try_from(last - first + 1).unwrap_or(0));
    for serial in first..=last {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(RangeError::Cancelled {
                completed: digests.len() as u64,
            });
        }
        digests.push(serial_digest(seed, serial, width).map_err(RangeError::Failed)?);
    }
    Ok(digests)
}

fn digest_parallel(
    seed: &Seed,
    total: u64,
    width: usize,
    threads: usize,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<SerialDigest>, ShuffleError> {
    let chunk = total.div_ceil(threads as u64);
    let ranges: Vec<(u64, u64)> = (0..threads as u64)
        .map(|k| (1 + k * chunk, ((k + 1) * chunk).min(total)))
        .filter(|(first, last)| first <= last)
        .collect();

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .iter()
            .map(|&(first, last)| scope.spawn(move || digest_range(seed, first, last, width, cancel)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    let mut digests = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
    let mut completed = 0u64;
    let mut cancelled = false;
    for result in results {
        match result {
            Ok(part) => {
                completed += part.len() as u64;
                digests.extend(part);
            }
            Err(RangeError::Cancelled { completed: done }) => {
                completed += done;
                cancelled = true;
            }
            Err(RangeError::Failed(err)) => return Err(err),
        }
    }

    if cancelled {
        return Err(ShuffleError::Cancelled { completed, total });
    }
    Ok(digests)
}
