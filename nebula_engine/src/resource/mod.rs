//! Resource management module
//!
//! Hash-identified resource records, their persisted form and the cache
//! that loads, links and releases them.

pub mod hash;
pub mod kind;
pub mod record;
pub mod shader;
pub mod shader_program;
pub mod shader_variant;
pub mod sampler;
pub mod texture;
pub mod cube_map;
pub mod material;
pub mod builtin;
mod resource_manager;

pub use hash::{ResourceHash, BUILTIN_HASH_THRESHOLD};
pub use kind::ResourceKind;
pub use record::{Resource, ResourceData, ResourceType};
pub use shader::Shader;
pub use shader_program::ShaderProgram;
pub use shader_variant::{ShaderVariant, VariantSlot};
pub use sampler::TextureSampler;
pub use texture::StaticTexture;
pub use cube_map::{CubeMap, CUBE_FACE_COUNT};
pub use material::{Material, MaterialBindings};
pub use builtin::BuiltinResource;
pub use resource_manager::{ResourceManager, ResourceManagerConfig};
