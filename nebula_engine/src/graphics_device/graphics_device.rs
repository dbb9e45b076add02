/// GraphicsDevice trait - GPU object factory interface

use std::sync::Arc;

use crate::error::Result;
use crate::graphics_device::{
    ShaderModule, Pipeline, DescriptorSetLayout, Sampler, Texture,
    ShaderModuleDesc, PipelineDesc, DescriptorSetLayoutDesc, SamplerDesc, TextureDesc,
};

/// Physical device limits the resource layer depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceLimits {
    /// Minimum alignment of dynamic uniform buffer offsets (power of two)
    pub min_uniform_buffer_offset_alignment: u64,
    /// Largest uniform buffer range a descriptor may address
    pub max_uniform_buffer_range: u64,
}

impl Default for DeviceLimits {
    fn default() -> Self {
        Self {
            min_uniform_buffer_offset_alignment: 256,
            max_uniform_buffer_range: 65536,
        }
    }
}

/// Graphics device trait
///
/// This is the factory interface for the GPU objects the resource layer
/// creates. Implemented by backend-specific devices.
pub trait GraphicsDevice: Send + Sync {
    /// Limits reported by the physical device
    fn limits(&self) -> DeviceLimits;

    /// Create a shader module from compiled bytecode
    fn create_shader_module(&mut self, desc: ShaderModuleDesc) -> Result<Arc<dyn ShaderModule>>;

    /// Create a graphics pipeline
    fn create_pipeline(&mut self, desc: PipelineDesc) -> Result<Arc<dyn Pipeline>>;

    /// Create a descriptor set layout
    ///
    /// The layout is destroyed when the returned handle is dropped.
    fn create_descriptor_set_layout(
        &mut self,
        desc: &DescriptorSetLayoutDesc,
    ) -> Result<Arc<dyn DescriptorSetLayout>>;

    /// Create a texture sampler
    fn create_sampler(&mut self, desc: SamplerDesc) -> Result<Arc<dyn Sampler>>;

    /// Create a texture and upload its initial content
    ///
    /// Covers image creation, image view creation and the layout transition
    /// to shader-read.
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Wait for all GPU operations to complete
    fn wait_idle(&self) -> Result<()>;
}
