/// Pipeline trait and pipeline descriptor

use std::fmt;
use std::sync::Arc;
use crate::graphics_device::{ShaderModule, DescriptorSetLayout};

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// Triangle list
    TriangleList,
    /// Line list
    LineList,
}

// ===== RASTERIZATION ENUMS =====

/// Face culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    /// No culling
    None,
    /// Cull front faces
    Front,
    /// Cull back faces
    Back,
}

/// Polygon rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    /// Fill polygons
    Fill,
    /// Draw edges only (wireframe)
    Line,
}

// ===== DEPTH ENUMS =====

/// Comparison operator for depth tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Pass if value < reference
    Less,
    /// Pass if value <= reference
    LessOrEqual,
}

// ===== RASTERIZATION STATE =====

/// Rasterization fixed-function state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizationState {
    /// Face culling mode
    pub cull_mode: CullMode,
    /// Polygon rendering mode
    pub polygon_mode: PolygonMode,
    /// Constant depth bias (shadow passes), None = disabled
    pub depth_bias: Option<f32>,
}

impl Default for RasterizationState {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::Back,
            polygon_mode: PolygonMode::Fill,
            depth_bias: None,
        }
    }
}

// ===== DEPTH STATE =====

/// Depth testing state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthStencilState {
    /// Enable depth testing
    pub depth_test_enable: bool,
    /// Enable writing to depth buffer
    pub depth_write_enable: bool,
    /// Depth comparison operator
    pub depth_compare_op: CompareOp,
}

impl Default for DepthStencilState {
    fn default() -> Self {
        Self {
            depth_test_enable: true,
            depth_write_enable: true,
            depth_compare_op: CompareOp::Less,
        }
    }
}

// ===== COLOR BLEND STATE =====

/// Color blending state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBlendState {
    /// Enable src-alpha / one-minus-src-alpha blending
    pub blend_enable: bool,
    /// Write color channels (false for depth-only passes)
    pub color_write_enable: bool,
}

impl Default for ColorBlendState {
    fn default() -> Self {
        Self {
            blend_enable: false,
            color_write_enable: true,
        }
    }
}

/// Fixed-function state of a pipeline, independent of its shaders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineState {
    /// Primitive topology
    pub topology: PrimitiveTopology,
    /// Rasterization state
    pub rasterization: RasterizationState,
    /// Depth testing state
    pub depth_stencil: DepthStencilState,
    /// Color blending state
    pub color_blend: ColorBlendState,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            topology: PrimitiveTopology::TriangleList,
            rasterization: RasterizationState::default(),
            depth_stencil: DepthStencilState::default(),
            color_blend: ColorBlendState::default(),
        }
    }
}

// ===== PIPELINE DESCRIPTOR =====

/// Descriptor for creating a graphics pipeline
#[derive(Clone)]
pub struct PipelineDesc {
    /// Vertex shader
    pub vertex_shader: Arc<dyn ShaderModule>,
    /// Fragment shader
    pub fragment_shader: Arc<dyn ShaderModule>,
    /// Optional geometry shader
    pub geometry_shader: Option<Arc<dyn ShaderModule>>,
    /// Descriptor set layouts, in set order
    pub descriptor_set_layouts: Vec<Arc<dyn DescriptorSetLayout>>,
    /// Fixed-function state
    pub state: PipelineState,
}

/// Pipeline resource trait
///
/// Implemented by backend-specific pipeline types.
/// The pipeline is automatically destroyed when dropped.
pub trait Pipeline: Send + Sync + fmt::Debug {
    /// Fixed-function state the pipeline was built with
    fn state(&self) -> &PipelineState;
}
