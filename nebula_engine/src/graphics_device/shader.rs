/// ShaderModule trait and shader descriptor

use std::fmt;
use bitflags::bitflags;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment/Pixel shader
    Fragment,
    /// Geometry shader
    Geometry,
}

impl ShaderStage {
    /// Stage mask containing only this stage
    pub fn flags(self) -> ShaderStageFlags {
        match self {
            ShaderStage::Vertex => ShaderStageFlags::VERTEX,
            ShaderStage::Fragment => ShaderStageFlags::FRAGMENT,
            ShaderStage::Geometry => ShaderStageFlags::GEOMETRY,
        }
    }

    /// Conventional source file extension (`vert`, `frag`, `geom`)
    pub fn extension(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vert",
            ShaderStage::Fragment => "frag",
            ShaderStage::Geometry => "geom",
        }
    }
}

bitflags! {
    /// Set of shader stages a binding is visible to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderStageFlags: u32 {
        const VERTEX = 1 << 0;
        const FRAGMENT = 1 << 1;
        const GEOMETRY = 1 << 2;
    }
}

/// Descriptor for creating a shader module
#[derive(Debug, Clone)]
pub struct ShaderModuleDesc<'a> {
    /// Compiled shader bytecode (SPIR-V)
    pub code: &'a [u8],
    /// Shader stage
    pub stage: ShaderStage,
    /// Entry point function name
    pub entry_point: String,
}

/// Shader module trait
///
/// Implemented by backend-specific shader modules.
/// The module is automatically destroyed when dropped.
pub trait ShaderModule: Send + Sync + fmt::Debug {
    /// Stage the module was compiled for
    fn stage(&self) -> ShaderStage;
}
