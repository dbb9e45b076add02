/// Deserializer - reads encoded fields back with a cursor

use glam::{UVec2, Vec4};
use crate::codec::BinaryRead;
use crate::error::{Error, Result};

/// Cursor over a borrowed byte buffer
#[derive(Debug, Clone)]
pub struct Deserializer<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> Deserializer<'a> {
    /// Start reading at the beginning of `buffer`
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    /// Decode the next value
    pub fn read<T: BinaryRead>(&mut self) -> Result<T> {
        T::read_from(self)
    }

    /// Take the next `count` bytes
    ///
    /// Fails with `Error::Format` without moving the cursor when fewer than
    /// `count` bytes remain.
    pub fn read_raw(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(Error::Format(format!(
                "read past end: requested {} byte(s) at offset {}, {} remaining",
                count,
                self.cursor,
                self.remaining()
            )));
        }
        let bytes = &self.buffer[self.cursor..self.cursor + count];
        self.cursor += count;
        Ok(bytes)
    }

    /// Read a `u32` length prefix followed by that many bytes
    pub fn read_blob(&mut self) -> Result<&'a [u8]> {
        let start = self.cursor;
        let len = self.read::<u32>()? as usize;
        if len > self.remaining() {
            self.cursor = start;
            return Err(Error::Format(format!(
                "declared blob length {} exceeds the {} remaining byte(s)",
                len,
                self.remaining()
            )));
        }
        self.read_raw(len)
    }

    /// Bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Whether the cursor reached the end of the buffer
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Current cursor offset
    pub fn position(&self) -> usize {
        self.cursor
    }
}

// ===== PRIMITIVE DECODINGS =====

macro_rules! impl_read_le {
    ($($ty:ty),*) => {
        $(
            impl BinaryRead for $ty {
                fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
                    let bytes = deserializer.read_raw(std::mem::size_of::<$ty>())?;
                    let mut array = [0u8; std::mem::size_of::<$ty>()];
                    array.copy_from_slice(bytes);
                    Ok(<$ty>::from_le_bytes(array))
                }
            }
        )*
    };
}

impl_read_le!(u8, u16, u32, u64, i32, i64, f32);

impl BinaryRead for bool {
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
        match deserializer.read::<u8>()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::Format(format!("invalid boolean byte {}", other))),
        }
    }
}

impl BinaryRead for String {
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
        let bytes = deserializer.read_blob()?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::Format(format!("string is not valid UTF-8: {}", e)))
    }
}

impl BinaryRead for Vec<u8> {
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
        Ok(deserializer.read_blob()?.to_vec())
    }
}

impl BinaryRead for Vec4 {
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
        Ok(Vec4::new(
            deserializer.read()?,
            deserializer.read()?,
            deserializer.read()?,
            deserializer.read()?,
        ))
    }
}

impl BinaryRead for UVec2 {
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
        Ok(UVec2::new(deserializer.read()?, deserializer.read()?))
    }
}
