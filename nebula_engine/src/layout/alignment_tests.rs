//! Unit tests for alignment.rs
//!
//! Tests padding arithmetic and block offsets without any device.

use super::*;
use crate::error::Error;

// ============================================================================
// pad_to
// ============================================================================

#[test]
fn test_pad_to_already_aligned() {
    assert_eq!(pad_to(256, 256).unwrap(), 256);
    assert_eq!(pad_to(64, 16).unwrap(), 64);
}

#[test]
fn test_pad_to_rounds_up() {
    assert_eq!(pad_to(80, 256).unwrap(), 256);
    assert_eq!(pad_to(257, 256).unwrap(), 512);
    assert_eq!(pad_to(1, 4).unwrap(), 4);
}

#[test]
fn test_pad_to_zero_stays_zero() {
    for alignment in [1u64, 4, 16, 64, 256] {
        assert_eq!(pad_to(0, alignment).unwrap(), 0);
    }
}

#[test]
fn test_pad_to_properties() {
    for alignment in [1u64, 2, 4, 8, 16, 32, 64, 128, 256] {
        for size in 0u64..600 {
            let padded = pad_to(size, alignment).unwrap();
            assert_eq!(padded % alignment, 0, "size {} align {}", size, alignment);
            assert!(padded >= size);
            assert!(padded - size < alignment);
        }
    }
}

#[test]
fn test_pad_to_rejects_non_power_of_two() {
    assert!(matches!(pad_to(10, 3), Err(Error::InvalidResource(_))));
    assert!(matches!(pad_to(10, 0), Err(Error::InvalidResource(_))));
    assert!(matches!(pad_to(10, 48), Err(Error::InvalidResource(_))));
}

#[test]
fn test_pad_to_near_u64_max() {
    assert_eq!(pad_to(u64::MAX, 1).unwrap(), u64::MAX);
    assert_eq!(pad_to(u64::MAX - 255, 256).unwrap(), u64::MAX - 255);
    assert!(matches!(pad_to(u64::MAX - 1, 256), Err(Error::InvalidResource(_))));
    assert!(matches!(pad_to(u64::MAX - 254, 256), Err(Error::InvalidResource(_))));
}

// ============================================================================
// UniformBlockLayout
// ============================================================================

#[test]
fn test_layout_main_block_256() {
    let layout = UniformBlockLayout::compute(256, 80, 256).unwrap();
    assert_eq!(layout.fragment_offset, 256);
    assert_eq!(layout.total_size, 336);
    assert_eq!(layout.total_offset, 512);
}

#[test]
fn test_layout_small_alignment_packs_tightly() {
    let layout = UniformBlockLayout::compute(128, 48, 16).unwrap();
    assert_eq!(layout.fragment_offset, 128);
    assert_eq!(layout.total_size, 176);
    assert_eq!(layout.total_offset, 176);
}

#[test]
fn test_layout_zero_vertex_size() {
    let layout = UniformBlockLayout::compute(0, 64, 256).unwrap();
    assert_eq!(layout.fragment_offset, 0);
    assert_eq!(layout.total_size, 64);
    assert_eq!(layout.total_offset, 256);
}

#[test]
fn test_layout_invariants_hold() {
    for alignment in [16u64, 64, 256] {
        for (vertex, fragment) in [(0u64, 64u64), (128, 32), (256, 80), (100, 100)] {
            let layout = UniformBlockLayout::compute(vertex, fragment, alignment).unwrap();
            assert_eq!(layout.fragment_offset % alignment, 0);
            assert!(layout.fragment_offset >= vertex);
            assert_eq!(layout.total_size, layout.fragment_offset + fragment);
            assert_eq!(layout.total_offset % alignment, 0);
            assert!(layout.total_offset >= layout.total_size);
        }
    }
}

#[test]
fn test_layout_instance_offsets() {
    let layout = UniformBlockLayout::compute(256, 80, 256).unwrap();
    assert_eq!(layout.instance_offset(0), 0);
    assert_eq!(layout.instance_offset(3), 1536);
    assert_eq!(layout.fragment_instance_offset(3), 1792);
    assert_eq!(layout.buffer_size(4), 2048);
}

#[test]
fn test_layout_rejects_oversized_blocks() {
    assert!(UniformBlockLayout::compute(u64::MAX, 0, 256).is_err());
    assert!(UniformBlockLayout::compute(256, u64::MAX - 100, 256).is_err());
    // fits, but the stride cannot be padded
    assert!(UniformBlockLayout::compute(0, u64::MAX - 10, 16).is_err());
}

#[test]
fn test_layout_rejects_bad_alignment() {
    assert!(UniformBlockLayout::compute(256, 80, 100).is_err());
}
