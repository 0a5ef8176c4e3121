//! # Radix Binary
//!
//! An immutable wrapper around raw bytes that can be viewed in any positional
//! numeral base. Values of any length are supported: conversions go through
//! arbitrary-precision arithmetic instead of native integers.
//!
//! # Example
//!
//! ```
//! # use radix_binary::*;
//! # fn main() -> Result<(), BinaryError> {
//! let value = BinaryValue::new("ff", 16)?;
//! assert_eq!(value.to_decimal(), "255");
//! assert_eq!(value.to_binary(), "11111111");
//!
//! // Base 2 input is converted and packed into whole bytes.
//! let value = BinaryValue::new("1010", 2)?;
//! assert_eq!(value.to_hex(), "0a");
//! assert_eq!(value.to_base(BINARY)?, "00001010");
//!
//! // Any ordered alphabet works as an output base.
//! assert_eq!(value.to_base("ACGT")?, "GG");
//! # Ok(())
//! # }
//! ```
//!
//! `BinaryValue::random` produces sample values from a time-seeded hash. It
//! is not a secure source; use `BinaryValue::random_with` and an OS RNG when
//! that matters.

pub mod binary;
pub mod bn;
pub mod error;
pub mod radix;
pub mod rand;
