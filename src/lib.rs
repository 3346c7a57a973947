//! UUID version 4 generation and conversion among four string encodings
//!
//! ```rust
//! # #[cfg(feature = "global_gen")]
//! # {
//! use uuid4::uuid4;
//!
//! let uuid = uuid4();
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! # }
//! ```
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            random                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |            random             |  ver  |        random         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        random                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            random                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where the 4-bit `ver` field is set at `0100`, the 2-bit `var` field is set at `10`, and the
//! remaining 122 bits come from a cryptographically secure random source.
//!
//! # Encodings
//!
//! Every value can be written and read in four forms:
//!
//! | Encoding | Length | Example                                  |
//! |----------|--------|------------------------------------------|
//! | binary   | 128    | `0110000101100010...`                    |
//! | hex      | 32     | `6162636465664768a96a303132333435`       |
//! | UUID     | 36     | `61626364-6566-4768-a96a-303132333435`   |
//! | base 64  | 22     | `BhYmNkZWZHaKlqMDEyMzQ1`                 |
//!
//! The base 64 form uses the URL-safe alphabet `A-Z a-z 0-9 - _` over the value padded with four
//! leading zero bits; it is not RFC 4648 base64.
//!
//! ```rust
//! use uuid4::{codec, AsEncodings, Uuid4};
//!
//! let mut id = Uuid4::new();
//! id.from_uuid4("61626364-6566-4768-a96a-303132333435", true)?;
//! assert_eq!(&*id.as_base64()?, "BhYmNkZWZHaKlqMDEyMzQ1");
//!
//! assert_eq!(
//!     &*codec::base64_to_hex("BhYmNkZWZHaKlqMDEyMzQ1")?,
//!     "6162636465664768a96a303132333435"
//! );
//! # Ok::<(), uuid4::Error>(())
//! ```
//!
//! # Bulk generation
//!
//! [`Uuid4Gen`] fetches random bytes for many UUIDs at once, which amortizes the cost of the
//! operating system generator:
//!
//! ```rust
//! use uuid4::{AsEncodings, Depth, Uuid4Gen};
//!
//! let mut g = Uuid4Gen::with_depth(Depth::new(256)?)?;
//! for _ in 0..4 {
//!     println!("{}", g.as_base64()?);
//! }
//! # Ok::<(), uuid4::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::{Error, ErrorKind, Result};

pub mod codec;
pub use codec::Encoding;

pub mod source;
pub use source::RandomSource;

mod uuid;
pub use uuid::Uuid;

mod encodings;
pub use encodings::AsEncodings;

mod v4;
pub use v4::Uuid4;

pub mod generator;
pub use generator::{Depth, Uuid4Gen};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{try_uuid4, uuid4};
