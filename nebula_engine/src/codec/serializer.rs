/// Serializer - appends encoded fields to a growable byte buffer

use glam::{UVec2, Vec4};
use crate::codec::BinaryWrite;

/// Growable output buffer for the positional binary format
#[derive(Debug, Default, Clone)]
pub struct Serializer {
    buffer: Vec<u8>,
}

impl Serializer {
    /// Create an empty serializer
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Create an empty serializer with a preallocated buffer
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buffer: Vec::with_capacity(capacity) }
    }

    /// Append the encoding of `value`
    pub fn write<T: BinaryWrite + ?Sized>(&mut self, value: &T) -> &mut Self {
        value.write_to(self);
        self
    }

    /// Append a length-prefixed blob
    pub fn write_blob(&mut self, bytes: &[u8]) -> &mut Self {
        debug_assert!(bytes.len() <= u32::MAX as usize, "blob too large for a u32 length prefix");
        self.write_raw(&(bytes.len() as u32).to_le_bytes());
        self.write_raw(bytes)
    }

    /// Append bytes without any length prefix
    pub fn write_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(bytes);
        self
    }

    /// Bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the serializer and return its buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Number of bytes written
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing was written yet
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

// ===== PRIMITIVE ENCODINGS =====

macro_rules! impl_write_le {
    ($($ty:ty),*) => {
        $(
            impl BinaryWrite for $ty {
                fn write_to(&self, serializer: &mut Serializer) {
                    serializer.write_raw(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_write_le!(u8, u16, u32, u64, i32, i64, f32);

impl BinaryWrite for bool {
    fn write_to(&self, serializer: &mut Serializer) {
        serializer.write_raw(&[*self as u8]);
    }
}

impl BinaryWrite for str {
    fn write_to(&self, serializer: &mut Serializer) {
        serializer.write_blob(self.as_bytes());
    }
}

impl BinaryWrite for String {
    fn write_to(&self, serializer: &mut Serializer) {
        self.as_str().write_to(serializer);
    }
}

impl BinaryWrite for [u8] {
    fn write_to(&self, serializer: &mut Serializer) {
        serializer.write_blob(self);
    }
}

impl BinaryWrite for Vec<u8> {
    fn write_to(&self, serializer: &mut Serializer) {
        self.as_slice().write_to(serializer);
    }
}

impl BinaryWrite for Vec4 {
    fn write_to(&self, serializer: &mut Serializer) {
        for component in self.to_array() {
            component.write_to(serializer);
        }
    }
}

impl BinaryWrite for UVec2 {
    fn write_to(&self, serializer: &mut Serializer) {
        self.x.write_to(serializer);
        self.y.write_to(serializer);
    }
}
