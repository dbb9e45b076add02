/// Built-in resources
///
/// Resources below the built-in threshold have no file-backed form. They
/// are created in code, in table order, before any user resource can
/// reference them.

use crate::graphics_device::{SamplerDesc, ShaderStage, TextureFormat};
use crate::resource::{
    ResourceData, ResourceHash,
    Shader, ShaderProgram, ShaderVariant, TextureSampler, StaticTexture, CubeMap, Material,
};

const DEFAULT_VERTEX_SHADER: &str = r#"#version 450

layout(location = 0) in vec3 in_position;

void main() {
    gl_Position = vec4(in_position, 1.0);
}
"#;

const DEFAULT_FRAGMENT_SHADER: &str = r#"#version 450

layout(location = 0) out vec4 out_color;

void main() {
    out_color = vec4(0.8, 0.8, 0.8, 1.0);
}
"#;

// SPIR-V 1.0 of the two shaders above, so that bootstrap never needs the
// external compiler.

const SPIRV_MAGIC: u32 = 0x0723_0203;

#[rustfmt::skip]
const DEFAULT_VERTEX_SPIRV: [u32; 99] = [
    SPIRV_MAGIC, 0x0001_0000, 0, 18, 0,
    0x0002_0011, 1,                                  // OpCapability Shader
    0x0003_000e, 0, 1,                               // OpMemoryModel Logical GLSL450
    0x0007_000f, 0, 11, 0x6e69_616d, 0, 8, 9,        // OpEntryPoint Vertex %main "main" %pos %out
    0x0004_0047, 8, 30, 0,                           // OpDecorate %pos Location 0
    0x0004_0047, 9, 11, 0,                           // OpDecorate %out BuiltIn Position
    0x0002_0013, 1,                                  // %void
    0x0003_0021, 2, 1,                               // %fn = void()
    0x0003_0016, 3, 32,                              // %float
    0x0004_0017, 4, 3, 3,                            // %vec3
    0x0004_0017, 5, 3, 4,                            // %vec4
    0x0004_0020, 6, 1, 4,                            // Input *vec3
    0x0004_0020, 7, 3, 5,                            // Output *vec4
    0x0004_003b, 6, 8, 1,                            // %pos
    0x0004_003b, 7, 9, 3,                            // %out
    0x0004_002b, 3, 10, 0x3f80_0000,                 // 1.0
    0x0005_0036, 1, 11, 0, 2,                        // %main
    0x0002_00f8, 12,
    0x0004_003d, 4, 13, 8,                           // load %pos
    0x0005_0051, 3, 14, 13, 0,                       // x
    0x0005_0051, 3, 15, 13, 1,                       // y
    0x0005_0051, 3, 16, 13, 2,                       // z
    0x0007_0050, 5, 17, 14, 15, 16, 10,              // vec4(x, y, z, 1.0)
    0x0003_003e, 9, 17,
    0x0001_00fd,                                     // OpReturn
    0x0001_0038,                                     // OpFunctionEnd
];

#[rustfmt::skip]
const DEFAULT_FRAGMENT_SPIRV: [u32; 70] = [
    SPIRV_MAGIC, 0x0001_0000, 0, 12, 0,
    0x0002_0011, 1,                                  // OpCapability Shader
    0x0003_000e, 0, 1,                               // OpMemoryModel Logical GLSL450
    0x0006_000f, 4, 10, 0x6e69_616d, 0, 6,           // OpEntryPoint Fragment %main "main" %out
    0x0003_0010, 10, 7,                              // OpExecutionMode %main OriginUpperLeft
    0x0004_0047, 6, 30, 0,                           // OpDecorate %out Location 0
    0x0002_0013, 1,                                  // %void
    0x0003_0021, 2, 1,                               // %fn = void()
    0x0003_0016, 3, 32,                              // %float
    0x0004_0017, 4, 3, 4,                            // %vec4
    0x0004_0020, 5, 3, 4,                            // Output *vec4
    0x0004_003b, 5, 6, 3,                            // %out
    0x0004_002b, 3, 7, 0x3f4c_cccd,                  // 0.8
    0x0004_002b, 3, 8, 0x3f80_0000,                  // 1.0
    0x0007_002c, 4, 9, 7, 7, 7, 8,                   // vec4(0.8, 0.8, 0.8, 1.0)
    0x0005_0036, 1, 10, 0, 2,                        // %main
    0x0002_00f8, 11,
    0x0003_003e, 6, 9,
    0x0001_00fd,                                     // OpReturn
    0x0001_0038,                                     // OpFunctionEnd
];

fn spirv_bytes(words: &[u32]) -> Vec<u8> {
    bytemuck::cast_slice::<u32, u8>(words).to_vec()
}

const MAGENTA: [u8; 4] = [255, 0, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];
const FLAT_NORMAL: [u8; 4] = [128, 128, 255, 255];
const SKY_GREY: [u8; 4] = [128, 128, 128, 255];

/// Built-in resources, identified by their reserved hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum BuiltinResource {
    DefaultSampler = 0x10,
    DebugTexture = 0x11,
    WhiteTexture = 0x12,
    FlatNormalTexture = 0x13,
    DefaultVertexShader = 0x20,
    DefaultFragmentShader = 0x21,
    DefaultShaderProgram = 0x22,
    DefaultMaterial = 0x30,
    DebugCubeMap = 0x31,
    DefaultCubeMap = 0x32,
    BlackCubeMap = 0x33,
}

impl BuiltinResource {
    /// Every built-in, dependencies first
    pub const ALL: [BuiltinResource; 11] = [
        BuiltinResource::DefaultSampler,
        BuiltinResource::DebugTexture,
        BuiltinResource::WhiteTexture,
        BuiltinResource::FlatNormalTexture,
        BuiltinResource::DefaultVertexShader,
        BuiltinResource::DefaultFragmentShader,
        BuiltinResource::DefaultShaderProgram,
        BuiltinResource::DefaultMaterial,
        BuiltinResource::DebugCubeMap,
        BuiltinResource::DefaultCubeMap,
        BuiltinResource::BlackCubeMap,
    ];

    pub fn hash(self) -> ResourceHash {
        ResourceHash(self as u64)
    }

    pub fn from_hash(hash: ResourceHash) -> Option<Self> {
        Self::ALL.iter().copied().find(|builtin| builtin.hash() == hash)
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltinResource::DefaultSampler => "Default Sampler",
            BuiltinResource::DebugTexture => "Debug Texture",
            BuiltinResource::WhiteTexture => "White Texture",
            BuiltinResource::FlatNormalTexture => "Flat Normal Texture",
            BuiltinResource::DefaultVertexShader => "Default Vertex Shader",
            BuiltinResource::DefaultFragmentShader => "Default Fragment Shader",
            BuiltinResource::DefaultShaderProgram => "Default Shader Program",
            BuiltinResource::DefaultMaterial => "Default Material",
            BuiltinResource::DebugCubeMap => "Debug Cube Map",
            BuiltinResource::DefaultCubeMap => "Default Cube Map",
            BuiltinResource::BlackCubeMap => "Black Cube Map",
        }
    }

    /// Build the payload of the built-in
    pub fn initialize(self) -> ResourceData {
        let sampler = BuiltinResource::DefaultSampler.hash();
        match self {
            BuiltinResource::DefaultSampler => {
                ResourceData::Sampler(TextureSampler::new(SamplerDesc::default()))
            }
            BuiltinResource::DebugTexture => {
                ResourceData::Texture(checker_texture(8, MAGENTA, BLACK, sampler))
            }
            BuiltinResource::WhiteTexture => {
                ResourceData::Texture(StaticTexture::solid(1, 1, WHITE, sampler))
            }
            BuiltinResource::FlatNormalTexture => {
                ResourceData::Texture(StaticTexture::solid(1, 1, FLAT_NORMAL, sampler))
            }
            BuiltinResource::DefaultVertexShader => ResourceData::Shader(Shader::from_bytecode(
                ShaderStage::Vertex,
                DEFAULT_VERTEX_SHADER,
                spirv_bytes(&DEFAULT_VERTEX_SPIRV),
            )),
            BuiltinResource::DefaultFragmentShader => ResourceData::Shader(Shader::from_bytecode(
                ShaderStage::Fragment,
                DEFAULT_FRAGMENT_SHADER,
                spirv_bytes(&DEFAULT_FRAGMENT_SPIRV),
            )),
            BuiltinResource::DefaultShaderProgram => ResourceData::ShaderProgram(ShaderProgram::new(
                BuiltinResource::DefaultVertexShader.hash(),
                BuiltinResource::DefaultFragmentShader.hash(),
                None,
                ShaderVariant::Default,
            )),
            BuiltinResource::DefaultMaterial => ResourceData::Material(Material::new(
                BuiltinResource::DefaultShaderProgram.hash(),
                BuiltinResource::WhiteTexture.hash(),
                BuiltinResource::FlatNormalTexture.hash(),
            )),
            BuiltinResource::DebugCubeMap => ResourceData::CubeMap(CubeMap::from_face_colors(
                1,
                [
                    [255, 0, 0, 255],
                    [0, 255, 255, 255],
                    [0, 255, 0, 255],
                    [255, 0, 255, 255],
                    [0, 0, 255, 255],
                    [255, 255, 0, 255],
                ],
                sampler,
            )),
            BuiltinResource::DefaultCubeMap => {
                ResourceData::CubeMap(CubeMap::from_face_colors(1, [SKY_GREY; 6], sampler))
            }
            BuiltinResource::BlackCubeMap => {
                ResourceData::CubeMap(CubeMap::from_face_colors(1, [BLACK; 6], sampler))
            }
        }
    }
}

/// Square checkerboard with one-texel cells
fn checker_texture(size: u32, a: [u8; 4], b: [u8; 4], sampler: ResourceHash) -> StaticTexture {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            pixels.extend_from_slice(if (x + y) % 2 == 0 { &a } else { &b });
        }
    }
    StaticTexture::new(size, size, TextureFormat::R8G8B8A8_UNORM, pixels, sampler)
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod tests;
