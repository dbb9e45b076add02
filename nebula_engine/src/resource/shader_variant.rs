/// Shader variants
///
/// A shader program is authored for one variant tag. Programs carry up to
/// five slots pointing at alternate programs for the passes that need a
/// different shader (shadow maps, cube captures, ...). The tag also fixes
/// the pipeline's fixed-function state and its uniform layout kind.

use crate::codec::{BinaryRead, BinaryWrite, Deserializer, Serializer};
use crate::error::{Error, Result};
use crate::graphics_device::{
    PipelineState, PrimitiveTopology, PolygonMode, CullMode, CompareOp,
};
use crate::layout::UniformKind;

/// Constant depth bias of depth-only passes, against shadow acne
pub const SHADOW_DEPTH_BIAS: f32 = 1.25;

// ===== SHADER VARIANT =====

/// Rendering configuration a shader program is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ShaderVariant {
    Default = 0,
    Shadow = 1,
    Cube = 2,
    ShadowCube = 3,
    Object = 4,
    Halo = 5,
    Light = 6,
    PostProcess = 7,
    WireFrame = 8,
    Depth = 9,
    SkyBox = 10,
    Window = 11,
    Line = 12,
}

impl ShaderVariant {
    /// Every variant, in combo order
    pub const ALL: [ShaderVariant; 13] = [
        ShaderVariant::Default,
        ShaderVariant::Shadow,
        ShaderVariant::Cube,
        ShaderVariant::ShadowCube,
        ShaderVariant::Object,
        ShaderVariant::Halo,
        ShaderVariant::Light,
        ShaderVariant::PostProcess,
        ShaderVariant::WireFrame,
        ShaderVariant::Depth,
        ShaderVariant::SkyBox,
        ShaderVariant::Window,
        ShaderVariant::Line,
    ];

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Label shown in the editor combo
    pub fn name(self) -> &'static str {
        match self {
            ShaderVariant::Default => "Default",
            ShaderVariant::Shadow => "Shadow",
            ShaderVariant::Cube => "Cube",
            ShaderVariant::ShadowCube => "Shadow Cube",
            ShaderVariant::Object => "Object",
            ShaderVariant::Halo => "Halo",
            ShaderVariant::Light => "Light",
            ShaderVariant::PostProcess => "Post Process",
            ShaderVariant::WireFrame => "Wire Frame",
            ShaderVariant::Depth => "Depth",
            ShaderVariant::SkyBox => "Sky Box",
            ShaderVariant::Window => "Window",
            ShaderVariant::Line => "Line",
        }
    }

    /// Slot holding the alternate program for this variant, if any
    pub fn slot(self) -> Option<VariantSlot> {
        match self {
            ShaderVariant::Shadow => Some(VariantSlot::Shadow),
            ShaderVariant::Cube => Some(VariantSlot::Cube),
            ShaderVariant::ShadowCube => Some(VariantSlot::ShadowCube),
            ShaderVariant::Object => Some(VariantSlot::Object),
            ShaderVariant::Halo => Some(VariantSlot::Halo),
            _ => None,
        }
    }

    /// Uniform layout kind bound by programs of this variant
    pub fn uniform_kind(self) -> UniformKind {
        match self {
            ShaderVariant::Light => UniformKind::Light,
            ShaderVariant::PostProcess => UniformKind::Post,
            ShaderVariant::Window => UniformKind::Window,
            _ => UniformKind::Main,
        }
    }

    /// Fixed-function state of pipelines built for this variant
    pub fn pipeline_state(self) -> PipelineState {
        let mut state = PipelineState::default();
        match self {
            ShaderVariant::WireFrame => {
                state.rasterization.polygon_mode = PolygonMode::Line;
            }
            ShaderVariant::Line => {
                state.topology = PrimitiveTopology::LineList;
            }
            ShaderVariant::SkyBox => {
                state.rasterization.cull_mode = CullMode::None;
                state.depth_stencil.depth_compare_op = CompareOp::LessOrEqual;
                state.depth_stencil.depth_write_enable = false;
            }
            ShaderVariant::Shadow | ShaderVariant::ShadowCube | ShaderVariant::Depth => {
                state.rasterization.cull_mode = CullMode::Front;
                state.rasterization.depth_bias = Some(SHADOW_DEPTH_BIAS);
                state.color_blend.color_write_enable = false;
            }
            ShaderVariant::Halo | ShaderVariant::Window | ShaderVariant::PostProcess => {
                state.color_blend.blend_enable = true;
                state.depth_stencil.depth_write_enable = false;
            }
            ShaderVariant::Default
            | ShaderVariant::Cube
            | ShaderVariant::Object
            | ShaderVariant::Light => {}
        }
        state
    }
}

impl Default for ShaderVariant {
    fn default() -> Self {
        ShaderVariant::Default
    }
}

impl BinaryWrite for ShaderVariant {
    fn write_to(&self, serializer: &mut Serializer) {
        serializer.write(&self.as_u8());
    }
}

impl BinaryRead for ShaderVariant {
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
        let value = deserializer.read::<u8>()?;
        ShaderVariant::from_u8(value)
            .ok_or_else(|| Error::Format(format!("unknown shader variant {}", value)))
    }
}

// ===== VARIANT SLOT =====

/// Alternate-program slots of a shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantSlot {
    Shadow,
    Cube,
    ShadowCube,
    Object,
    Halo,
}

impl VariantSlot {
    pub const COUNT: usize = 5;

    pub const ALL: [VariantSlot; Self::COUNT] = [
        VariantSlot::Shadow,
        VariantSlot::Cube,
        VariantSlot::ShadowCube,
        VariantSlot::Object,
        VariantSlot::Halo,
    ];

    /// Position in the persisted slot array
    pub fn index(self) -> usize {
        match self {
            VariantSlot::Shadow => 0,
            VariantSlot::Cube => 1,
            VariantSlot::ShadowCube => 2,
            VariantSlot::Object => 3,
            VariantSlot::Halo => 4,
        }
    }

    /// Variant the slot is used for
    pub fn variant(self) -> ShaderVariant {
        match self {
            VariantSlot::Shadow => ShaderVariant::Shadow,
            VariantSlot::Cube => ShaderVariant::Cube,
            VariantSlot::ShadowCube => ShaderVariant::ShadowCube,
            VariantSlot::Object => ShaderVariant::Object,
            VariantSlot::Halo => ShaderVariant::Halo,
        }
    }
}

#[cfg(test)]
#[path = "shader_variant_tests.rs"]
mod tests;
