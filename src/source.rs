//! Sources of cryptographically random buckets.
//!
//! A bucket is 16 random bytes, the raw material of one UUID. Generators draw whole buckets
//! through [`RandomSource::produce`], which validates the bucket count before asking the
//! underlying source to fill a buffer.
//!
//! The default source is the operating system's cryptographically secure generator. Any other
//! byte stream can be injected with [`from_fn`] or, for `rand` generators, [`Adapter`].
//!
//! ```rust
//! use uuid4::source::{self, RandomSource};
//!
//! let mut counter = 0u8;
//! let mut stream = source::from_fn(|dest: &mut [u8]| {
//!     for e in dest.iter_mut() {
//!         *e = counter;
//!         counter = counter.wrapping_add(1);
//!     }
//!     Ok(())
//! });
//! let tank = stream.produce(2)?;
//! assert_eq!(tank.len(), 32);
//! assert_eq!(tank[31], 31);
//! # Ok::<(), uuid4::Error>(())
//! ```

use std::{fmt, num::NonZeroU16};

use rand::rngs::OsRng;

use crate::{Error, Result};

pub mod with_rand08;
pub use with_rand08::Adapter;

/// Number of bytes in one bucket.
pub const BUCKET_LEN: usize = 16;

/// The source used when none is injected: the operating system's secure generator.
pub type DefaultSource = Adapter<OsRng>;

/// A trait that defines the minimum random byte source interface for the generators.
pub trait RandomSource {
    /// Fills `dest` with cryptographically random data.
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;

    /// Returns `buckets * 16` random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`] unless `buckets` is between 1 and 8191, and propagates failures
    /// of [`fill_bytes`](RandomSource::fill_bytes).
    fn produce(&mut self, buckets: usize) -> Result<Vec<u8>> {
        let buckets = BucketCount::new(buckets)?;
        let mut tank = vec![0u8; buckets.byte_len()];
        self.fill_bytes(&mut tank)?;
        tracing::trace!(buckets = buckets.get(), "produced random buckets");
        Ok(tank)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(dest)
    }

    fn produce(&mut self, buckets: usize) -> Result<Vec<u8>> {
        (**self).produce(buckets)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(dest)
    }

    fn produce(&mut self, buckets: usize) -> Result<Vec<u8>> {
        (**self).produce(buckets)
    }
}

/// Returns `buckets * 16` bytes from the [`DefaultSource`].
///
/// # Examples
///
/// ```rust
/// let tank = uuid4::source::random_buckets(16)?;
/// assert_eq!(tank.len(), 256);
/// # Ok::<(), uuid4::Error>(())
/// ```
pub fn random_buckets(buckets: usize) -> Result<Vec<u8>> {
    DefaultSource::default().produce(buckets)
}

/// Creates a source that fills buffers by calling `f`.
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(&mut [u8]) -> Result<()>,
{
    FromFn(f)
}

/// A [`RandomSource`] backed by a closure; see [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F>(F);

impl<F> RandomSource for FromFn<F>
where
    F: FnMut(&mut [u8]) -> Result<()>,
{
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        (self.0)(dest)
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

/// A validated number of buckets to draw in one call, between 1 and 8191.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct BucketCount(NonZeroU16);

impl BucketCount {
    /// Smallest number of buckets one call may deliver.
    pub const MIN: usize = 1;

    /// Largest number of buckets one call may deliver.
    pub const MAX: usize = 8191;

    /// Creates a bucket count, failing with [`Error::Range`] outside `MIN..=MAX`.
    pub fn new(buckets: usize) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&buckets) {
            match NonZeroU16::new(buckets as u16) {
                Some(n) => Ok(Self(n)),
                None => Err(out_of_range(buckets)),
            }
        } else {
            Err(out_of_range(buckets))
        }
    }

    /// Returns the number of buckets.
    pub const fn get(self) -> usize {
        self.0.get() as usize
    }

    /// Returns the number of bytes the buckets occupy.
    pub const fn byte_len(self) -> usize {
        self.get() * BUCKET_LEN
    }
}

fn out_of_range(received: impl fmt::Display) -> Error {
    Error::Range(format!(
        "Pumping guild rules limit me to delivering between {} and {} buckets but received one for \"{}\" buckets instead",
        BucketCount::MIN,
        BucketCount::MAX,
        received
    ))
}

impl TryFrom<usize> for BucketCount {
    type Error = Error;

    fn try_from(buckets: usize) -> Result<Self, Self::Error> {
        Self::new(buckets)
    }
}

impl TryFrom<f64> for BucketCount {
    type Error = Error;

    /// Accepts integral values only, failing with [`Error::Type`] otherwise.
    fn try_from(buckets: f64) -> Result<Self, Self::Error> {
        if !buckets.is_finite() || buckets.fract() != 0.0 {
            return Err(Error::Type(format!(
                "Pumping guild rules limit me to delivering only full buckets but received one for \"{}\" buckets instead",
                buckets
            )));
        }
        if buckets < Self::MIN as f64 || buckets > Self::MAX as f64 {
            return Err(out_of_range(buckets));
        }
        Self::new(buckets as usize)
    }
}
