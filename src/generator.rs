//! Buffered UUIDv4 generator and its tank depth.

use std::{fmt, str};

use rand::{CryptoRng, RngCore};

use crate::source::{with_rand08, DefaultSource, RandomSource, BUCKET_LEN};
use crate::{codec, AsEncodings, Error, Result, Uuid};


/// Represents a UUIDv4 generator that draws random buckets in batches.
///
/// The generator keeps a tank of `depth` buckets fetched with one call of the random source and
/// issues one bucket per UUID, highest slot first. Once every slot of a fill has been issued, the
/// next request refills the whole tank with one more call. This amortizes the cost of reaching
/// the operating system generator across `depth` UUIDs, which pays off for bulk generation.
///
/// Unlike [`Uuid4`](crate::Uuid4), every `as_*` call returns a fresh UUID.
///
/// # Examples
///
/// ```rust
/// use uuid4::{AsEncodings, Depth, Uuid4Gen};
///
/// let mut g = Uuid4Gen::with_depth(Depth::new(64)?)?;
/// let a = g.as_uuid()?;
/// let b = g.as_uuid()?;
/// assert_ne!(a, b);
///
/// for e in g.by_ref().take(4) {
///     println!("{}", e?);
/// }
/// # Ok::<(), uuid4::Error>(())
/// ```
pub struct Uuid4Gen<S = DefaultSource> {
    depth: Depth,
    tank: Vec<u8>,

    /// Unissued slots of the current fill; the next slot issued is `remaining - 1`.
    remaining: usize,

    /// The random source used to fill the tank.
    source: S,
}

impl Uuid4Gen {
    /// Creates a generator of [`Depth::DEFAULT`] drawing from the operating system generator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceMissing`] if the initial fill fails.
    pub fn new() -> Result<Self> {
        Self::with_depth(Depth::default())
    }

    /// Creates a generator of `depth` drawing from the operating system generator.
    pub fn with_depth(depth: Depth) -> Result<Self> {
        Self::with_source(depth, DefaultSource::default())
    }
}

impl<S: RandomSource> Uuid4Gen<S> {
    /// Creates a generator of `depth` drawing from `source`, filling the tank right away.
    ///
    /// # Errors
    ///
    /// Propagates failures of the initial fill, and returns [`Error::Range`] if the source
    /// delivers other than `depth` buckets.
    pub fn with_source(depth: Depth, source: S) -> Result<Self> {
        let mut g = Self {
            depth,
            tank: Vec::new(),
            remaining: 0,
            source,
        };
        g.fill()?;
        Ok(g)
    }

    /// Returns the number of buckets fetched per fill.
    pub const fn depth(&self) -> Depth {
        self.depth
    }

    /// Returns the number of UUIDs issuable before the next refill.
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Generates a new UUIDv4 object, refilling the tank first if it is empty.
    pub fn generate(&mut self) -> Result<Uuid> {
        if self.remaining == 0 {
            self.fill()?;
        }
        self.remaining -= 1;
        let start = self.remaining * BUCKET_LEN;
        let bucket = &self.tank[start..start + BUCKET_LEN];
        Ok(Uuid::from(codec::raw_to_v4(bucket)?))
    }

    fn fill(&mut self) -> Result<()> {
        let tank = self.source.produce(self.depth.get())?;
        let expected = self.depth.get() * BUCKET_LEN;
        if tank.len() != expected {
            return Err(Error::Range(format!(
                "Expected random source to deliver {} bytes but was given length: {}",
                expected,
                tank.len()
            )));
        }
        self.tank = tank;
        self.remaining = self.depth.get();
        tracing::debug!(depth = self.depth.get(), "filled uuid tank");
        Ok(())
    }
}

impl<T: RngCore + CryptoRng> Uuid4Gen<with_rand08::Adapter<T>> {
    /// Creates a generator of `depth` with a cryptographically secure [`RngCore`] from `rand`
    /// (v0.8) crate.
    pub fn with_rand08(depth: Depth, rng: T) -> Result<Self> {
        Self::with_source(depth, with_rand08::Adapter(rng))
    }
}

impl<S: RandomSource> AsEncodings for Uuid4Gen<S> {
    fn as_value(&mut self) -> Result<Uuid> {
        self.generate()
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv4 object for each call
/// of `next()`.
impl<S: RandomSource> Iterator for Uuid4Gen<S> {
    type Item = Result<Uuid>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<S: RandomSource> std::iter::FusedIterator for Uuid4Gen<S> {}

impl<S> fmt::Debug for Uuid4Gen<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uuid4Gen")
            .field("depth", &self.depth)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// Number of buckets a [`Uuid4Gen`] fetches per fill, between 4 and 8191.
///
/// Larger depths trade memory for fewer calls into the random source; the default of 16 suits
/// most workloads. Bulk workloads such as large batch inserts may profit from testing larger
/// values.
///
/// `Depth` can be read from configuration text or, with the `serde` feature, from any number:
///
/// ```rust
/// use uuid4::{Depth, ErrorKind};
///
/// assert_eq!("64".parse::<Depth>()?.get(), 64);
/// assert_eq!("4.5".parse::<Depth>().unwrap_err().kind(), ErrorKind::Type);
/// assert_eq!("3".parse::<Depth>().unwrap_err().kind(), ErrorKind::Range);
/// # Ok::<(), uuid4::Error>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "u16")
)]
pub struct Depth(u16);

impl Depth {
    /// Smallest accepted depth.
    pub const MIN: usize = 4;

    /// Largest accepted depth.
    pub const MAX: usize = 8191;

    /// Depth used when none is configured.
    pub const DEFAULT: Self = Self(16);

    /// Creates a depth, failing with [`Error::Range`] outside `MIN..=MAX`.
    pub fn new(depth: usize) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&depth) {
            Ok(Self(depth as u16))
        } else {
            Err(out_of_range(depth))
        }
    }

    /// Returns the depth as a number of buckets.
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

fn out_of_range(received: impl fmt::Display) -> Error {
    Error::Range(format!(
        "Depth must be between {} and {} but received \"{}\" instead",
        Depth::MIN,
        Depth::MAX,
        received
    ))
}

fn not_integer(received: impl fmt::Display) -> Error {
    Error::Type(format!(
        "Depth must be an integer but received \"{}\" instead",
        received
    ))
}

impl Default for Depth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<usize> for Depth {
    type Error = Error;

    fn try_from(depth: usize) -> Result<Self, Self::Error> {
        Self::new(depth)
    }
}

impl TryFrom<f64> for Depth {
    type Error = Error;

    /// Accepts integral values only, failing with [`Error::Type`] otherwise.
    fn try_from(depth: f64) -> Result<Self, Self::Error> {
        if !depth.is_finite() || depth.fract() != 0.0 {
            return Err(not_integer(depth));
        }
        if depth < Self::MIN as f64 || depth > Self::MAX as f64 {
            return Err(out_of_range(depth));
        }
        Self::new(depth as usize)
    }
}

impl From<Depth> for u16 {
    fn from(src: Depth) -> Self {
        src.0
    }
}

impl str::FromStr for Depth {
    type Err = Error;

    /// Parses a decimal number, failing with [`Error::Type`] on anything but an integer.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let depth = src.trim().parse::<f64>().map_err(|_| not_integer(src))?;
        Self::try_from(depth)
    }
}
