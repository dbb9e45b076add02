//! Binary codec for persisted resources
//!
//! A positional little-endian format: integers and floats are written at
//! their fixed size, strings and blobs as a `u32` length followed by raw
//! bytes. Readers must consume fields in exactly the order writers produced
//! them. The only tag in the format is the one-byte resource kind written in
//! front of every top-level record.

mod serializer;
mod deserializer;

pub use serializer::Serializer;
pub use deserializer::Deserializer;

use crate::error::Result;

/// A value that can be appended to a [`Serializer`]
pub trait BinaryWrite {
    /// Append the encoding of `self`
    fn write_to(&self, serializer: &mut Serializer);
}

/// A value that can be decoded from a [`Deserializer`]
pub trait BinaryRead: Sized {
    /// Decode the next value, advancing the cursor
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self>;
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
