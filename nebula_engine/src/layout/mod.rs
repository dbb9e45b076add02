/// Layout module - GPU uniform-buffer layout
///
/// - `alignment`: padding arithmetic and per-block offsets
/// - `uniform_layout`: uniform block structs, one layout object per kind

pub mod alignment;
pub mod uniform_layout;

pub use alignment::*;
pub use uniform_layout::*;
