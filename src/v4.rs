//! Single-shot UUIDv4 that is generated lazily or parsed from an existing encoding.

use rand::{CryptoRng, RngCore};

use crate::source::{with_rand08, DefaultSource, RandomSource};
use crate::{codec, AsEncodings, Result, Uuid};

/// Represents one UUIDv4 that is generated on first use and then kept.
///
/// The first call of any `as_*` accessor draws one bucket from the random source and caches the
/// resulting UUID; later calls encode the cached value again. The `from_*` methods replace the
/// cached value with a parsed one.
///
/// # Examples
///
/// ```rust
/// use uuid4::{AsEncodings, Uuid4};
///
/// let mut id = Uuid4::new();
/// let uuid = id.as_uuid()?;
/// assert_eq!(uuid.len(), 36);
/// assert_eq!(&*id.as_hex_string()?, uuid.replace('-', ""));
///
/// id.from_base64("BhYmNkZWZHaKlqMDEyMzQ1", true)?;
/// assert_eq!(&*id.as_uuid()?, "61626364-6566-4768-a96a-303132333435");
/// # Ok::<(), uuid4::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Uuid4<S = DefaultSource> {
    value: Option<Uuid>,

    /// The random source drawn from on first use.
    source: S,
}

impl Uuid4 {
    /// Creates an instance that draws from the operating system generator on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an instance whose value is made from 16 caller-supplied random bytes.
    ///
    /// The version and variant bits are set as if the bytes came from the random source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`](crate::Error::Range) if `raw` is not 16 bytes long.
    pub fn from_random_bytes(raw: &[u8]) -> Result<Self> {
        let value = Uuid::from(codec::raw_to_v4(raw)?);
        Ok(Self {
            value: Some(value),
            source: DefaultSource::default(),
        })
    }
}

impl<S: RandomSource> Uuid4<S> {
    /// Creates an instance that draws from `source` on first use.
    pub const fn with_source(source: S) -> Self {
        Self {
            value: None,
            source,
        }
    }

    /// Returns the current value without generating one.
    pub const fn value(&self) -> Option<Uuid> {
        self.value
    }

    /// Replaces the value with one parsed from the custom base 64 encoding.
    ///
    /// # Errors
    ///
    /// - [`Error::Range`](crate::Error::Range) if `src` is not 22 characters long.
    /// - [`Error::Decoding`](crate::Error::Decoding) if `src` has characters outside the
    ///   alphabet.
    /// - [`Error::InvalidUuid`](crate::Error::InvalidUuid) if `validate` is set and the value
    ///   is not a v4 UUID.
    ///
    /// The previous value is kept on any error.
    pub fn from_base64(&mut self, src: &str, validate: bool) -> Result<()> {
        self.commit(Uuid::parse_base64(src)?, validate)
    }

    /// Replaces the value with one parsed from a 128-digit binary string.
    ///
    /// Fails like [`from_base64`](Self::from_base64), for 128 characters of `0` and `1`.
    pub fn from_bin_string(&mut self, src: &str, validate: bool) -> Result<()> {
        self.commit(Uuid::parse_bin(src)?, validate)
    }

    /// Replaces the value with one parsed from 32 hexadecimal digits of either case.
    ///
    /// Fails like [`from_base64`](Self::from_base64), for 32 hexadecimal digits.
    pub fn from_hex_string(&mut self, src: &str, validate: bool) -> Result<()> {
        self.commit(Uuid::parse_hex(src)?, validate)
    }

    /// Replaces the value with one parsed from the 8-4-4-4-12 form.
    ///
    /// Fails like [`from_base64`](Self::from_base64), for 36 characters with dashes exactly
    /// at offsets 8, 13, 18 and 23; misplaced dashes and invalid digits are reported with
    /// different messages.
    pub fn from_uuid4(&mut self, src: &str, validate: bool) -> Result<()> {
        self.commit(Uuid::parse_dashed(src)?, validate)
    }

    fn commit(&mut self, value: Uuid, validate: bool) -> Result<()> {
        if validate {
            codec::check_v4(value.as_bytes())?;
        }
        self.value = Some(value);
        Ok(())
    }
}

impl<T: RngCore + CryptoRng> Uuid4<with_rand08::Adapter<T>> {
    /// Creates an instance that draws from a cryptographically secure [`RngCore`] from `rand`
    /// (v0.8) crate.
    pub const fn with_rand08(rng: T) -> Self {
        Self::with_source(with_rand08::Adapter(rng))
    }
}

impl<S: RandomSource> AsEncodings for Uuid4<S> {
    fn as_value(&mut self) -> Result<Uuid> {
        if let Some(value) = self.value {
            return Ok(value);
        }
        let bucket = self.source.produce(1)?;
        let value = Uuid::from(codec::raw_to_v4(&bucket)?);
        self.value = Some(value);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Uuid4;
    use crate::{source, AsEncodings, ErrorKind};
    use std::{cell::Cell, rc::Rc};

    const RAW: [u8; 16] = [
        0x61, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6a, 0x30, 0x31, 0x32, 0x33, 0x34,
        0x35,
    ];

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES)
        .map(|_| Uuid4::new().as_uuid().unwrap().to_string())
        .collect());

    /// Encodes injected bytes in every encoding
    #[test]
    fn encodes_injected_bytes_in_every_encoding() {
        let mut id = Uuid4::from_random_bytes(&RAW).unwrap();
        assert_eq!(&*id.as_hex_string().unwrap(), "6162636465664768a96a303132333435");
        assert_eq!(&*id.as_uuid().unwrap(), "61626364-6566-4768-a96a-303132333435");
        assert_eq!(&*id.as_base64().unwrap(), "BhYmNkZWZHaKlqMDEyMzQ1");
        assert_eq!(id.as_bin_string().unwrap().len(), 128);

        let e = Uuid4::from_random_bytes(&RAW[1..]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Range);
        assert_eq!(
            e.to_string(),
            "Expected data array length of 16 but was given length: 15"
        );
    }

    /// Generates once and reuses the cached value
    #[test]
    fn generates_once_and_reuses_the_cached_value() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut id = Uuid4::with_source(source::from_fn(move |dest: &mut [u8]| {
            counter.set(counter.get() + 1);
            dest.copy_from_slice(&RAW);
            Ok(())
        }));
        assert_eq!(id.value(), None);
        assert_eq!(calls.get(), 0);

        let base64 = id.as_base64().unwrap();
        assert_eq!(&*base64, "BhYmNkZWZHaKlqMDEyMzQ1");
        assert_eq!(calls.get(), 1);
        for _ in 0..4 {
            assert_eq!(id.as_base64().unwrap(), base64);
            assert_eq!(&*id.as_uuid().unwrap(), "61626364-6566-4768-a96a-303132333435");
        }
        assert_eq!(calls.get(), 1);
        assert!(id.value().unwrap().is_v4());
    }

    /// Parses every encoding of the same value
    #[test]
    fn parses_every_encoding_of_the_same_value() {
        let mut reference = Uuid4::from_random_bytes(&RAW).unwrap();
        let bin = reference.as_bin_string().unwrap();
        let hex = reference.as_hex_string().unwrap();
        let uuid = reference.as_uuid().unwrap();
        let base64 = reference.as_base64().unwrap();

        for validate in [false, true] {
            let mut id = Uuid4::new();
            id.from_bin_string(&bin, validate).unwrap();
            assert_eq!(id.as_base64().unwrap(), base64);
            id.from_base64(&base64, validate).unwrap();
            assert_eq!(id.as_hex_string().unwrap(), hex);
            id.from_hex_string(&hex.to_uppercase(), validate).unwrap();
            assert_eq!(id.as_uuid().unwrap(), uuid);
            id.from_uuid4(&uuid, validate).unwrap();
            assert_eq!(id.as_bin_string().unwrap(), bin);
        }
    }

    /// Rejects non-v4 values only when validating
    #[test]
    fn rejects_non_v4_values_only_when_validating() {
        let altered = "f0f0f0f0f0f0c0f0b0f0f0f0f0f0f0f0";
        let mut id = Uuid4::new();
        let e = id.from_hex_string(altered, true).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidUuid);
        assert_eq!(id.value(), None);

        id.from_hex_string(altered, false).unwrap();
        assert_eq!(&*id.as_hex_string().unwrap(), altered);
        assert_eq!(
            &*id.as_uuid().unwrap(),
            "f0f0f0f0-f0f0-c0f0-b0f0-f0f0f0f0f0f0"
        );

        // variant bits 01
        let mut id = Uuid4::new();
        let e = id
            .from_uuid4("f0f0f0f0-f0f0-40f0-70f0-f0f0f0f0f0f0", true)
            .unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidUuid);
        id.from_uuid4("f0f0f0f0-f0f0-40f0-b0f0-f0f0f0f0f0f0", true)
            .unwrap();
    }

    /// Keeps previous value after failed parse
    #[test]
    fn keeps_previous_value_after_failed_parse() {
        let mut id = Uuid4::from_random_bytes(&RAW).unwrap();
        let before = id.value();
        let cases = [
            id.from_hex_string("f0f0f0f0f0f0c0f0b0f0f0f0f0f0f0f0", true),
            id.from_hex_string("f0f0f0f0f0f040f0b0f0f0f0f0f0f0f", false),
            id.from_bin_string(&"2".repeat(128), false),
            id.from_base64("BhYmNkZWZHaKlqMDEyMzQ*", false),
            id.from_uuid4("61626364_6566-4768-a96a-303132333435", false),
        ];
        for result in cases {
            assert!(result.is_err());
        }
        assert_eq!(id.value(), before);
    }

    /// Returns kind and message matching each malformation
    #[test]
    fn returns_kind_and_message_matching_each_malformation() {
        let mut id = Uuid4::new();

        let e = id
            .from_hex_string("0062636465664768a96a30313233343", false)
            .unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Range);
        assert_eq!(
            e.to_string(),
            "Expected hex string length of 32 characters but was given length: 31"
        );

        let e = id.from_base64("BhYmNkZWZHaKlqMDEyMzQ", false).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Range);
        let e = id.from_bin_string("0", false).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Range);
        let e = id.from_uuid4("61626364656647", false).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Range);

        let e = id
            .from_uuid4("61626364-6566-4768-a96a-30313233343g", false)
            .unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Decoding);
        assert!(e.to_string().starts_with("UUID contains invalid character"));

        let e = id
            .from_uuid4("61626364-6566-4768-a96a3-03132333435", false)
            .unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Decoding);
        assert!(e.to_string().starts_with("UUID must have dashes"));
    }

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Sets constant bits and random bits properly
    #[test]
    fn sets_constant_bits_and_random_bits_properly() {
        // count '1' of each bit
        let bins = SAMPLES.with(|samples| {
            let mut bins = [0u32; 128];
            for e in samples {
                let mut it = bins.iter_mut().rev();
                for c in e.chars().rev() {
                    if let Some(mut num) = c.to_digit(16) {
                        for _ in 0..4 {
                            *it.next().unwrap() += num & 1;
                            num >>= 1;
                        }
                    }
                }
            }
            bins
        });

        // test if constant bits are all set to 1 or 0
        let n = N_SAMPLES as u32;
        assert_eq!(bins[48], 0, "version bit 48");
        assert_eq!(bins[49], n, "version bit 49");
        assert_eq!(bins[50], 0, "version bit 50");
        assert_eq!(bins[51], 0, "version bit 51");
        assert_eq!(bins[64], n, "variant bit 64");
        assert_eq!(bins[65], 0, "variant bit 65");

        // test if random bits are set to 1 at ~50% probability
        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for i in (0..48).chain(52..64).chain(66..128) {
            let p = bins[i] as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {}: {}", i, p);
        }
    }
}
