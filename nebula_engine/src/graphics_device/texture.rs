/// Texture and Sampler traits with their descriptors

use std::fmt;

/// Texture pixel format
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit RGBA, linear
    R8G8B8A8_UNORM,
    /// 8-bit RGBA, sRGB encoded
    R8G8B8A8_SRGB,
}

impl TextureFormat {
    /// Size of one texel in bytes
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::R8G8B8A8_UNORM => 4,
            TextureFormat::R8G8B8A8_SRGB => 4,
        }
    }
}

/// Texture dimensionality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureType {
    /// Single 2D image
    Tex2D,
    /// Six square faces (+X, -X, +Y, -Y, +Z, -Z)
    Cube,
}

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc<'a> {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// 2D or cube
    pub texture_type: TextureType,
    /// Initial content, all layers tightly packed (None = uninitialized)
    pub data: Option<&'a [u8]>,
}

impl TextureDesc<'_> {
    /// Number of array layers implied by the texture type
    pub fn array_layers(&self) -> u32 {
        match self.texture_type {
            TextureType::Tex2D => 1,
            TextureType::Cube => 6,
        }
    }

    /// Expected size of `data` in bytes
    pub fn byte_size(&self) -> usize {
        self.width as usize
            * self.height as usize
            * self.format.bytes_per_pixel() as usize
            * self.array_layers() as usize
    }
}

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Nearest texel
    Nearest,
    /// Bilinear
    Linear,
}

/// Texture addressing outside [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Tile
    Repeat,
    /// Tile, mirrored every other repetition
    MirroredRepeat,
    /// Clamp to the edge texel
    ClampToEdge,
}

/// Descriptor for creating a sampler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerDesc {
    /// Minification filter
    pub min_filter: Filter,
    /// Magnification filter
    pub mag_filter: Filter,
    /// Addressing mode for all axes
    pub address_mode: AddressMode,
    /// Maximum anisotropy (1.0 = disabled)
    pub max_anisotropy: f32,
}

impl Default for SamplerDesc {
    fn default() -> Self {
        Self {
            min_filter: Filter::Linear,
            mag_filter: Filter::Linear,
            address_mode: AddressMode::Repeat,
            max_anisotropy: 1.0,
        }
    }
}

/// Texture trait
///
/// The image, its view and memory are destroyed when dropped.
pub trait Texture: Send + Sync + fmt::Debug {
    /// Width in pixels
    fn width(&self) -> u32;
    /// Height in pixels
    fn height(&self) -> u32;
    /// Number of array layers (6 for cube maps)
    fn array_layers(&self) -> u32;
}

/// Sampler trait
///
/// The sampler is destroyed when dropped.
pub trait Sampler: Send + Sync + fmt::Debug {
    /// Descriptor the sampler was created from
    fn desc(&self) -> &SamplerDesc;
}
