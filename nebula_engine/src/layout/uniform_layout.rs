/// Uniform layout objects
///
/// Each shader program binds one uniform layout kind. A kind fixes the
/// vertex/fragment uniform block structs and the descriptor set layout the
/// pipeline is built against. Offsets are computed per device, when the
/// descriptor set layout is created.

use std::sync::Arc;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, DescriptorSetLayout, DescriptorSetLayoutDesc,
    DescriptorBinding, DescriptorType, ShaderStageFlags,
};
use crate::layout::UniformBlockLayout;

// ===== UNIFORM BLOCKS =====

/// Vertex block of the main forward pass
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MainVertexUniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub light_space: Mat4,
}

/// Fragment block of the main forward pass
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MainFragmentUniforms {
    pub base_color: Vec4,
    pub camera_position: Vec4,
    pub light_direction: Vec4,
    pub light_color: Vec4,
    /// x = roughness, y = metallic, z/w unused
    pub material_params: Vec4,
}

/// Vertex block of light volumes
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightVertexUniforms {
    pub model: Mat4,
    pub view_projection: Mat4,
}

/// Fragment block of light volumes
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightFragmentUniforms {
    pub light_position: Vec4,
    pub light_color: Vec4,
    /// x = constant, y = linear, z = quadratic, w = range
    pub attenuation: Vec4,
}

/// Fragment block of full-screen post-processing (no vertex block)
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PostFragmentUniforms {
    pub resolution: Vec4,
    /// x = exposure, y = gamma
    pub tonemap: Vec4,
    pub vignette: Vec4,
    /// x = enabled, y = threshold
    pub bloom: Vec4,
}

/// Vertex block of editor/UI windows
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct WindowVertexUniforms {
    pub model: Mat4,
    pub orthographic_projection: Mat4,
}

/// Fragment block of editor/UI windows
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct WindowFragmentUniforms {
    pub tint: Vec4,
    pub rect: Vec4,
}

// ===== UNIFORM KIND =====

/// Closed set of uniform layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformKind {
    Main,
    Light,
    Post,
    Window,
}

impl UniformKind {
    pub const ALL: [UniformKind; 4] = [
        UniformKind::Main,
        UniformKind::Light,
        UniformKind::Post,
        UniformKind::Window,
    ];

    /// Size of the vertex block in bytes
    pub fn vertex_buf_size(self) -> u64 {
        match self {
            UniformKind::Main => std::mem::size_of::<MainVertexUniforms>() as u64,
            UniformKind::Light => std::mem::size_of::<LightVertexUniforms>() as u64,
            UniformKind::Post => 0,
            UniformKind::Window => std::mem::size_of::<WindowVertexUniforms>() as u64,
        }
    }

    /// Size of the fragment block in bytes
    pub fn fragment_buf_size(self) -> u64 {
        match self {
            UniformKind::Main => std::mem::size_of::<MainFragmentUniforms>() as u64,
            UniformKind::Light => std::mem::size_of::<LightFragmentUniforms>() as u64,
            UniformKind::Post => std::mem::size_of::<PostFragmentUniforms>() as u64,
            UniformKind::Window => std::mem::size_of::<WindowFragmentUniforms>() as u64,
        }
    }

    /// Descriptor bindings of the kind
    ///
    /// Binding 0 is always the dynamic uniform buffer, followed by the
    /// sampled images the kind reads.
    pub fn bindings(self) -> Vec<DescriptorBinding> {
        let uniform_stages = if self.vertex_buf_size() == 0 {
            ShaderStageFlags::FRAGMENT
        } else {
            ShaderStageFlags::VERTEX | ShaderStageFlags::FRAGMENT
        };
        let image_count = match self {
            // diffuse, normal, shadow map
            UniformKind::Main => 3,
            UniformKind::Light => 0,
            // scene color
            UniformKind::Post => 1,
            UniformKind::Window => 1,
        };

        let mut bindings = vec![DescriptorBinding {
            binding: 0,
            descriptor_type: DescriptorType::UniformBufferDynamic,
            stages: uniform_stages,
        }];
        for i in 0..image_count {
            bindings.push(DescriptorBinding {
                binding: 1 + i,
                descriptor_type: DescriptorType::CombinedImageSampler,
                stages: ShaderStageFlags::FRAGMENT,
            });
        }
        bindings
    }
}

// ===== UNIFORM LAYOUT OBJECT =====

/// Uniform layout of one kind, bound to a device once created
#[derive(Debug)]
pub struct UniformLayoutObject {
    kind: UniformKind,
    block_layout: Option<UniformBlockLayout>,
    descriptor_set_layout: Option<Arc<dyn DescriptorSetLayout>>,
}

impl UniformLayoutObject {
    pub fn new(kind: UniformKind) -> Self {
        Self {
            kind,
            block_layout: None,
            descriptor_set_layout: None,
        }
    }

    pub fn kind(&self) -> UniformKind {
        self.kind
    }

    pub fn vertex_buf_size(&self) -> u64 {
        self.kind.vertex_buf_size()
    }

    pub fn fragment_buf_size(&self) -> u64 {
        self.kind.fragment_buf_size()
    }

    /// Offsets for the device the layout was created on (None before creation)
    pub fn block_layout(&self) -> Option<&UniformBlockLayout> {
        self.block_layout.as_ref()
    }

    pub fn descriptor_set_layout(&self) -> Option<&Arc<dyn DescriptorSetLayout>> {
        self.descriptor_set_layout.as_ref()
    }

    pub fn is_created(&self) -> bool {
        self.descriptor_set_layout.is_some()
    }

    /// Compute the block offsets for `device` and create the descriptor set layout
    ///
    /// Replaces any layout created earlier, possibly on another device.
    pub fn create_descriptor_set_layout(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        let alignment = device.limits().min_uniform_buffer_offset_alignment;
        let block_layout = UniformBlockLayout::compute(
            self.vertex_buf_size(),
            self.fragment_buf_size(),
            alignment,
        )?;

        let desc = DescriptorSetLayoutDesc { bindings: self.kind.bindings() };
        let descriptor_set_layout = device.create_descriptor_set_layout(&desc)?;

        self.block_layout = Some(block_layout);
        self.descriptor_set_layout = Some(descriptor_set_layout);
        Ok(())
    }

    /// Drop the descriptor set layout and forget the device offsets
    pub fn destroy_descriptor_set_layout(&mut self) {
        self.descriptor_set_layout = None;
        self.block_layout = None;
    }
}

// ===== UNIFORM LAYOUTS =====

/// One layout object per uniform kind
#[derive(Debug)]
pub struct UniformLayouts {
    main: UniformLayoutObject,
    light: UniformLayoutObject,
    post: UniformLayoutObject,
    window: UniformLayoutObject,
}

impl UniformLayouts {
    pub fn new() -> Self {
        Self {
            main: UniformLayoutObject::new(UniformKind::Main),
            light: UniformLayoutObject::new(UniformKind::Light),
            post: UniformLayoutObject::new(UniformKind::Post),
            window: UniformLayoutObject::new(UniformKind::Window),
        }
    }

    pub fn get(&self, kind: UniformKind) -> &UniformLayoutObject {
        match kind {
            UniformKind::Main => &self.main,
            UniformKind::Light => &self.light,
            UniformKind::Post => &self.post,
            UniformKind::Window => &self.window,
        }
    }

    fn get_mut(&mut self, kind: UniformKind) -> &mut UniformLayoutObject {
        match kind {
            UniformKind::Main => &mut self.main,
            UniformKind::Light => &mut self.light,
            UniformKind::Post => &mut self.post,
            UniformKind::Window => &mut self.window,
        }
    }

    /// Create every descriptor set layout against `device`
    ///
    /// On failure, layouts created by this call are destroyed again.
    pub fn create_all(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        for (i, kind) in UniformKind::ALL.iter().enumerate() {
            if let Err(e) = self.get_mut(*kind).create_descriptor_set_layout(device) {
                for created in &UniformKind::ALL[..i] {
                    self.get_mut(*created).destroy_descriptor_set_layout();
                }
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn destroy_all(&mut self) {
        for kind in UniformKind::ALL {
            self.get_mut(kind).destroy_descriptor_set_layout();
        }
    }
}

impl Default for UniformLayouts {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "uniform_layout_tests.rs"]
mod tests;
