/// DescriptorSetLayout trait and layout descriptor

use std::fmt;
use crate::graphics_device::ShaderStageFlags;

/// Kind of resource bound at a descriptor binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorType {
    /// Uniform buffer addressed with a dynamic offset
    UniformBufferDynamic,
    /// Sampled image with its sampler
    CombinedImageSampler,
}

/// One binding slot of a descriptor set layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorBinding {
    /// Binding index in the set
    pub binding: u32,
    /// Resource kind
    pub descriptor_type: DescriptorType,
    /// Stages that can access the binding
    pub stages: ShaderStageFlags,
}

/// Descriptor for creating a descriptor set layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorSetLayoutDesc {
    /// Bindings, in binding order
    pub bindings: Vec<DescriptorBinding>,
}

/// Descriptor set layout trait
///
/// The layout is automatically destroyed when dropped.
pub trait DescriptorSetLayout: Send + Sync + fmt::Debug {
    /// Number of bindings in the layout
    fn binding_count(&self) -> u32;
}
