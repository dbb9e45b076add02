/// Resource kind discriminator
///
/// The one-byte tag written in front of every persisted record.

use crate::graphics_device::ShaderStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ResourceKind {
    VertexShader = 1,
    FragmentShader = 2,
    GeometryShader = 3,
    ShaderProgram = 4,
    TextureSampler = 5,
    StaticTexture = 6,
    Material = 7,
    CubeMap = 8,
}

impl ResourceKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(ResourceKind::VertexShader),
            2 => Some(ResourceKind::FragmentShader),
            3 => Some(ResourceKind::GeometryShader),
            4 => Some(ResourceKind::ShaderProgram),
            5 => Some(ResourceKind::TextureSampler),
            6 => Some(ResourceKind::StaticTexture),
            7 => Some(ResourceKind::Material),
            8 => Some(ResourceKind::CubeMap),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Kind of a shader resource for the given stage
    pub fn for_shader_stage(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => ResourceKind::VertexShader,
            ShaderStage::Fragment => ResourceKind::FragmentShader,
            ShaderStage::Geometry => ResourceKind::GeometryShader,
        }
    }

    /// Stage of a shader kind, None for every other kind
    pub fn shader_stage(self) -> Option<ShaderStage> {
        match self {
            ResourceKind::VertexShader => Some(ShaderStage::Vertex),
            ResourceKind::FragmentShader => Some(ShaderStage::Fragment),
            ResourceKind::GeometryShader => Some(ShaderStage::Geometry),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::VertexShader => "Vertex Shader",
            ResourceKind::FragmentShader => "Fragment Shader",
            ResourceKind::GeometryShader => "Geometry Shader",
            ResourceKind::ShaderProgram => "Shader Program",
            ResourceKind::TextureSampler => "Texture Sampler",
            ResourceKind::StaticTexture => "Static Texture",
            ResourceKind::Material => "Material",
            ResourceKind::CubeMap => "Cube Map",
        }
    }
}
