/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Tracks created objects and the number of objects still alive, and can be
/// told to fail pipeline or shader-module creation to exercise rollback and
/// fallback paths.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::engine_bail;
use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, DeviceLimits,
    ShaderModule, Pipeline, DescriptorSetLayout, Sampler, Texture,
    ShaderModuleDesc, PipelineDesc, DescriptorSetLayoutDesc, SamplerDesc, TextureDesc,
    ShaderStage, PipelineState,
};

// ============================================================================
// Live object counter
// ============================================================================

/// Decrements a shared counter when dropped
#[derive(Debug)]
pub struct LiveToken {
    counter: Arc<AtomicUsize>,
}

impl LiveToken {
    fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter: counter.clone() }
    }
}

impl Drop for LiveToken {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock objects
// ============================================================================

#[derive(Debug)]
pub struct MockShaderModule {
    pub stage: ShaderStage,
    pub code_size: usize,
    _live: LiveToken,
}

impl ShaderModule for MockShaderModule {
    fn stage(&self) -> ShaderStage {
        self.stage
    }
}

#[derive(Debug)]
pub struct MockPipeline {
    pub id: usize,
    pub state: PipelineState,
    pub has_geometry_shader: bool,
    pub set_layout_count: usize,
    _live: LiveToken,
}

impl Pipeline for MockPipeline {
    fn state(&self) -> &PipelineState {
        &self.state
    }
}

#[derive(Debug)]
pub struct MockDescriptorSetLayout {
    pub binding_count: u32,
    _live: LiveToken,
}

impl DescriptorSetLayout for MockDescriptorSetLayout {
    fn binding_count(&self) -> u32 {
        self.binding_count
    }
}

#[derive(Debug)]
pub struct MockSampler {
    pub desc: SamplerDesc,
    _live: LiveToken,
}

impl Sampler for MockSampler {
    fn desc(&self) -> &SamplerDesc {
        &self.desc
    }
}

#[derive(Debug)]
pub struct MockTexture {
    pub width: u32,
    pub height: u32,
    pub array_layers: u32,
    _live: LiveToken,
}

impl Texture for MockTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn array_layers(&self) -> u32 {
        self.array_layers
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock device that tracks created GPU objects without a GPU
#[derive(Debug)]
pub struct MockGraphicsDevice {
    pub limits: DeviceLimits,
    /// Fail every create_pipeline call while set
    pub fail_pipelines: bool,
    /// Fail every create_shader_module call while set
    pub fail_shader_modules: bool,
    pub created_pipelines: Arc<Mutex<Vec<usize>>>,
    pub created_shader_modules: Arc<Mutex<Vec<ShaderStage>>>,
    pub live_pipelines: Arc<AtomicUsize>,
    pub live_shader_modules: Arc<AtomicUsize>,
    pub live_descriptor_set_layouts: Arc<AtomicUsize>,
    pub live_samplers: Arc<AtomicUsize>,
    pub live_textures: Arc<AtomicUsize>,
}

impl MockGraphicsDevice {
    /// Create a mock device with a 256-byte uniform alignment
    pub fn new() -> Self {
        Self::with_alignment(256)
    }

    /// Create a mock device reporting the given uniform offset alignment
    pub fn with_alignment(min_uniform_buffer_offset_alignment: u64) -> Self {
        Self {
            limits: DeviceLimits {
                min_uniform_buffer_offset_alignment,
                ..DeviceLimits::default()
            },
            fail_pipelines: false,
            fail_shader_modules: false,
            created_pipelines: Arc::new(Mutex::new(Vec::new())),
            created_shader_modules: Arc::new(Mutex::new(Vec::new())),
            live_pipelines: Arc::new(AtomicUsize::new(0)),
            live_shader_modules: Arc::new(AtomicUsize::new(0)),
            live_descriptor_set_layouts: Arc::new(AtomicUsize::new(0)),
            live_samplers: Arc::new(AtomicUsize::new(0)),
            live_textures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of pipelines created so far
    pub fn pipeline_count(&self) -> usize {
        self.created_pipelines.lock().unwrap().len()
    }

    /// Number of pipelines not yet dropped
    pub fn live_pipeline_count(&self) -> usize {
        self.live_pipelines.load(Ordering::SeqCst)
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn limits(&self) -> DeviceLimits {
        self.limits
    }

    fn create_shader_module(&mut self, desc: ShaderModuleDesc) -> Result<Arc<dyn ShaderModule>> {
        if self.fail_shader_modules {
            engine_bail!("nebula::mock", "create_shader_module: forced failure ({:?})", desc.stage);
        }
        self.created_shader_modules.lock().unwrap().push(desc.stage);
        Ok(Arc::new(MockShaderModule {
            stage: desc.stage,
            code_size: desc.code.len(),
            _live: LiveToken::new(&self.live_shader_modules),
        }))
    }

    fn create_pipeline(&mut self, desc: PipelineDesc) -> Result<Arc<dyn Pipeline>> {
        if self.fail_pipelines {
            engine_bail!("nebula::mock", "create_pipeline: forced failure");
        }
        let mut created = self.created_pipelines.lock().unwrap();
        let id = created.len();
        created.push(id);
        Ok(Arc::new(MockPipeline {
            id,
            state: desc.state,
            has_geometry_shader: desc.geometry_shader.is_some(),
            set_layout_count: desc.descriptor_set_layouts.len(),
            _live: LiveToken::new(&self.live_pipelines),
        }))
    }

    fn create_descriptor_set_layout(
        &mut self,
        desc: &DescriptorSetLayoutDesc,
    ) -> Result<Arc<dyn DescriptorSetLayout>> {
        Ok(Arc::new(MockDescriptorSetLayout {
            binding_count: desc.bindings.len() as u32,
            _live: LiveToken::new(&self.live_descriptor_set_layouts),
        }))
    }

    fn create_sampler(&mut self, desc: SamplerDesc) -> Result<Arc<dyn Sampler>> {
        Ok(Arc::new(MockSampler {
            desc,
            _live: LiveToken::new(&self.live_samplers),
        }))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        if let Some(data) = desc.data {
            if data.len() != desc.byte_size() {
                engine_bail!("nebula::mock",
                    "create_texture: expected {} bytes, got {}", desc.byte_size(), data.len());
            }
        }
        Ok(Arc::new(MockTexture {
            width: desc.width,
            height: desc.height,
            array_layers: desc.array_layers(),
            _live: LiveToken::new(&self.live_textures),
        }))
    }

    fn wait_idle(&self) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
