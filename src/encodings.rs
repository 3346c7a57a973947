use fstr::FStr;

use crate::codec::{BASE64_LEN, BIN_LEN, HEX_LEN, UUID_LEN};
use crate::{Result, Uuid};

/// Provides a v4 (random) UUID in each of the four string encodings.
///
/// Implementors supply [`as_value`](AsEncodings::as_value); the encoded forms are derived from
/// it. Whether repeated calls return the same UUID depends on the implementor: [`Uuid4`]
/// caches its value while [`Uuid4Gen`] issues a fresh one per call.
///
/// [`Uuid4`]: crate::Uuid4
/// [`Uuid4Gen`]: crate::Uuid4Gen
pub trait AsEncodings {
    /// Returns the UUID that the other accessors encode.
    fn as_value(&mut self) -> Result<Uuid>;

    /// Returns the UUID as a binary string of 128 `0`s and `1`s.
    fn as_bin_string(&mut self) -> Result<FStr<BIN_LEN>> {
        Ok(self.as_value()?.encode_bin())
    }

    /// Returns the UUID as a 22-character custom base 64 string.
    fn as_base64(&mut self) -> Result<FStr<BASE64_LEN>> {
        Ok(self.as_value()?.encode_base64())
    }

    /// Returns the UUID as 32 hexadecimal digits without dashes.
    fn as_hex_string(&mut self) -> Result<FStr<HEX_LEN>> {
        Ok(self.as_value()?.encode_hex())
    }

    /// Returns the UUID in the 36-character 8-4-4-4-12 form.
    fn as_uuid(&mut self) -> Result<FStr<UUID_LEN>> {
        Ok(self.as_value()?.encode())
    }
}
