/// Static texture resource
///
/// An RGBA image uploaded once. Sampling state lives in a separate
/// sampler resource referenced by hash.

use std::sync::Arc;

use crate::codec::{BinaryRead, BinaryWrite, Deserializer, Serializer};
use crate::error::{Error, Result};
use crate::graphics_device::{Texture, TextureFormat};
use crate::resource::ResourceHash;

pub(crate) fn format_to_u8(format: TextureFormat) -> u8 {
    match format {
        TextureFormat::R8G8B8A8_UNORM => 0,
        TextureFormat::R8G8B8A8_SRGB => 1,
    }
}

pub(crate) fn format_from_u8(value: u8) -> Result<TextureFormat> {
    match value {
        0 => Ok(TextureFormat::R8G8B8A8_UNORM),
        1 => Ok(TextureFormat::R8G8B8A8_SRGB),
        _ => Err(Error::Format(format!("unknown texture format {}", value))),
    }
}

#[derive(Debug)]
pub struct StaticTexture {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    /// Tightly packed texels, row major
    pub pixels: Vec<u8>,
    /// Sampler as authored
    pub(crate) sampler: ResourceHash,
    /// Sampler the cache linked, NULL until linked
    pub(crate) bound_sampler: ResourceHash,
    texture: Option<Arc<dyn Texture>>,
}

impl StaticTexture {
    pub fn new(width: u32, height: u32, format: TextureFormat, pixels: Vec<u8>, sampler: ResourceHash) -> Self {
        Self {
            width,
            height,
            format,
            pixels,
            sampler,
            bound_sampler: ResourceHash::NULL,
            texture: None,
        }
    }

    /// Single-color texture
    pub fn solid(width: u32, height: u32, rgba: [u8; 4], sampler: ResourceHash) -> Self {
        let pixels = rgba.repeat((width * height) as usize);
        Self::new(width, height, TextureFormat::R8G8B8A8_UNORM, pixels, sampler)
    }

    /// Sampler the texture was authored with
    pub fn sampler(&self) -> ResourceHash {
        self.sampler
    }

    /// Sampler the texture is read with; differs from `sampler` when the
    /// authored one could not be resolved
    pub fn bound_sampler(&self) -> ResourceHash {
        self.bound_sampler
    }

    /// Byte size `pixels` must have
    pub fn expected_size(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel() as usize
    }

    pub fn texture(&self) -> Option<&Arc<dyn Texture>> {
        self.texture.as_ref()
    }

    pub(crate) fn set_texture(&mut self, texture: Arc<dyn Texture>) {
        self.texture = Some(texture);
    }

    pub(crate) fn release_gpu(&mut self) {
        self.texture = None;
    }
}

impl BinaryWrite for StaticTexture {
    fn write_to(&self, serializer: &mut Serializer) {
        serializer
            .write(&self.width)
            .write(&self.height)
            .write(&format_to_u8(self.format))
            .write(&self.pixels)
            .write(&self.sampler);
    }
}

impl BinaryRead for StaticTexture {
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
        let width = deserializer.read::<u32>()?;
        let height = deserializer.read::<u32>()?;
        let format = format_from_u8(deserializer.read()?)?;
        let pixels = deserializer.read::<Vec<u8>>()?;
        let sampler = deserializer.read::<ResourceHash>()?;
        Ok(Self::new(width, height, format, pixels, sampler))
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
