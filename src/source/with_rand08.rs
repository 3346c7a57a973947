//! Integration with `rand` (v0.8) crate.

use rand::{CryptoRng, RngCore};

use super::RandomSource;
use crate::{Error, Result};

/// An adapter that implements [`RandomSource`] for cryptographically secure [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore + CryptoRng> RandomSource for Adapter<T> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        self.0.try_fill_bytes(dest).map_err(|err| {
            tracing::warn!(error = %err, "cryptographic random source failed");
            Error::SourceMissing(err)
        })
    }
}
