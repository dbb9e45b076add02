/// Alignment engine for dynamic uniform buffers
///
/// A uniform block of a kind is stored as a vertex part followed by a
/// fragment part, both addressed through dynamic offsets. Every offset must
/// be a multiple of the device's `min_uniform_buffer_offset_alignment`.
///
/// ```text
/// instance i:  [ vertex block | pad | fragment block | pad ]
///              ^ i * total_offset   ^ + fragment_offset
/// ```

use crate::error::{Error, Result};

/// Round `size` up to the next multiple of `alignment`
///
/// `alignment` must be a non-zero power of two. Fails when the padded size
/// does not fit in a `u64`.
pub fn pad_to(size: u64, alignment: u64) -> Result<u64> {
    if !alignment.is_power_of_two() {
        return Err(Error::InvalidResource(format!(
            "uniform alignment {} is not a power of two",
            alignment
        )));
    }
    let mask = alignment - 1;
    size.checked_add(mask)
        .map(|rounded| rounded & !mask)
        .ok_or_else(|| Error::InvalidResource(format!(
            "uniform size {} cannot be padded to {} bytes",
            size, alignment
        )))
}

/// Device-aligned offsets of one uniform block kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformBlockLayout {
    /// Size of the vertex-stage block in bytes
    pub vertex_buf_size: u64,
    /// Size of the fragment-stage block in bytes
    pub fragment_buf_size: u64,
    /// Alignment the offsets were computed for
    pub alignment: u64,
    /// Offset of the fragment block from the start of an instance
    pub fragment_offset: u64,
    /// Bytes used by one instance (without trailing padding)
    pub total_size: u64,
    /// Stride between two instances
    pub total_offset: u64,
}

impl UniformBlockLayout {
    /// Compute offsets for the given block sizes and device alignment
    pub fn compute(vertex_buf_size: u64, fragment_buf_size: u64, alignment: u64) -> Result<Self> {
        let fragment_offset = pad_to(vertex_buf_size, alignment)?;
        let total_size = fragment_offset.checked_add(fragment_buf_size).ok_or_else(|| {
            Error::InvalidResource(format!(
                "uniform block of {} + {} bytes overflows",
                vertex_buf_size, fragment_buf_size
            ))
        })?;
        let total_offset = pad_to(total_size, alignment)?;

        Ok(Self {
            vertex_buf_size,
            fragment_buf_size,
            alignment,
            fragment_offset,
            total_size,
            total_offset,
        })
    }

    /// Dynamic offset of the vertex block of instance `index`
    pub fn instance_offset(&self, index: u32) -> u64 {
        index as u64 * self.total_offset
    }

    /// Dynamic offset of the fragment block of instance `index`
    pub fn fragment_instance_offset(&self, index: u32) -> u64 {
        self.instance_offset(index) + self.fragment_offset
    }

    /// Buffer size needed for `count` instances
    pub fn buffer_size(&self, count: u32) -> u64 {
        count as u64 * self.total_offset
    }
}

#[cfg(test)]
#[path = "alignment_tests.rs"]
mod tests;
