//! Error type shared by the codec, the random sources and the generators.

/// Errors raised while generating, converting or parsing UUIDs.
///
/// Every variant carries a message that names the expected constraint together with the
/// offending value or length.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A numeric parameter (depth, bucket count) is not an integer.
    #[error("{0}")]
    Type(String),

    /// A numeric parameter is out of bounds, or an input has the wrong length.
    #[error("{0}")]
    Range(String),

    /// An input of the correct length contains characters outside the expected alphabet, or
    /// its dashes are missing or misplaced.
    #[error("{0}")]
    Decoding(String),

    /// An input decodes cleanly but lacks the version 4 and RFC 4122 variant bits.
    #[error("{0}")]
    InvalidUuid(String),

    /// The cryptographic random number generator could not deliver any bytes.
    #[error("Could not find a usable random bucket pumping source: {0}")]
    SourceMissing(#[source] rand::Error),
}

/// Fieldless counterpart of [`Error`] for matching on the failure category.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    Type,
    Range,
    Decoding,
    InvalidUuid,
    SourceMissing,
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Type(_) => ErrorKind::Type,
            Self::Range(_) => ErrorKind::Range,
            Self::Decoding(_) => ErrorKind::Decoding,
            Self::InvalidUuid(_) => ErrorKind::InvalidUuid,
            Self::SourceMissing(_) => ErrorKind::SourceMissing,
        }
    }
}

/// Result type returned by fallible operations of this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
