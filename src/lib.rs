pub use crate::helpers::binary::BinaryValue;
pub use crate::helpers::error::BinaryError;
pub use crate::helpers::radix::{
    from_base, BASE32, BASE36, BINARY, DECIMAL, HEX, MAX_BASE, MIN_BASE, OCTAL, STANDARD,
};

mod helpers;

#[macro_use]
extern crate log;
#[cfg(feature = "serde")]
#[macro_use]
extern crate serde_derive;
