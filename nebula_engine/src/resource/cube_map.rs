/// Cube map resource
///
/// Six square faces in +X, -X, +Y, -Y, +Z, -Z order, uploaded as one
/// 6-layer texture.

use std::sync::Arc;

use crate::codec::{BinaryRead, BinaryWrite, Deserializer, Serializer};
use crate::error::Result;
use crate::graphics_device::{Texture, TextureFormat};
use crate::resource::texture::{format_from_u8, format_to_u8};
use crate::resource::ResourceHash;

pub const CUBE_FACE_COUNT: usize = 6;

#[derive(Debug)]
pub struct CubeMap {
    /// Edge length of every face in pixels
    pub size: u32,
    pub format: TextureFormat,
    pub faces: [Vec<u8>; CUBE_FACE_COUNT],
    pub(crate) sampler: ResourceHash,
    pub(crate) bound_sampler: ResourceHash,
    texture: Option<Arc<dyn Texture>>,
}

impl CubeMap {
    pub fn new(size: u32, format: TextureFormat, faces: [Vec<u8>; CUBE_FACE_COUNT], sampler: ResourceHash) -> Self {
        Self {
            size,
            format,
            faces,
            sampler,
            bound_sampler: ResourceHash::NULL,
            texture: None,
        }
    }

    /// Cube map with one color per face
    pub fn from_face_colors(size: u32, colors: [[u8; 4]; CUBE_FACE_COUNT], sampler: ResourceHash) -> Self {
        let texels = (size * size) as usize;
        let faces = colors.map(|rgba| rgba.repeat(texels));
        Self::new(size, TextureFormat::R8G8B8A8_UNORM, faces, sampler)
    }

    pub fn sampler(&self) -> ResourceHash {
        self.sampler
    }

    pub fn bound_sampler(&self) -> ResourceHash {
        self.bound_sampler
    }

    /// Byte size every face must have
    pub fn face_size(&self) -> usize {
        self.size as usize * self.size as usize * self.format.bytes_per_pixel() as usize
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

impl BinaryWrite for CubeMap {
    fn write_to(&self, serializer: &mut Serializer) {
        serializer.write(&self.size).write(&format_to_u8(self.format));
        for face in &self.faces {
            serializer.write(face);
        }
        serializer.write(&self.sampler);
    }
}

impl BinaryRead for CubeMap {
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
        let size = deserializer.read::<u32>()?;
        let format = format_from_u8(deserializer.read()?)?;
        let mut faces: [Vec<u8>; CUBE_FACE_COUNT] = Default::default();
        for face in faces.iter_mut() {
            *face = deserializer.read::<Vec<u8>>()?;
        }
        let sampler = deserializer.read::<ResourceHash>()?;
        Ok(Self::new(size, format, faces, sampler))
    }
}
