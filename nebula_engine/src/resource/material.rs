/// Material resource
///
/// Pure data: a shader program, two textures and surface parameters, all
/// references by hash. No GPU objects are created at this level.
///
/// The authored references are what gets saved. The cache links each one,
/// or its fallback, into `bindings`.

use glam::Vec4;

use crate::codec::{BinaryRead, BinaryWrite, Deserializer, Serializer};
use crate::error::Result;
use crate::resource::ResourceHash;

/// Resources a loaded material actually draws with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterialBindings {
    pub shader_program: ResourceHash,
    pub diffuse: ResourceHash,
    pub normal: ResourceHash,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub(crate) shader_program: ResourceHash,
    pub(crate) diffuse: ResourceHash,
    pub(crate) normal: ResourceHash,
    pub base_color: Vec4,
    pub roughness: f32,
    pub metallic: f32,
    pub(crate) bindings: MaterialBindings,
}

impl Material {
    pub fn new(shader_program: ResourceHash, diffuse: ResourceHash, normal: ResourceHash) -> Self {
        Self {
            shader_program,
            diffuse,
            normal,
            base_color: Vec4::ONE,
            roughness: 0.5,
            metallic: 0.0,
            bindings: MaterialBindings::default(),
        }
    }

    pub fn shader_program(&self) -> ResourceHash {
        self.shader_program
    }

    /// Diffuse texture, NULL when unset
    pub fn diffuse(&self) -> ResourceHash {
        self.diffuse
    }

    /// Normal texture, NULL when unset
    pub fn normal(&self) -> ResourceHash {
        self.normal
    }

    /// Linked references, all NULL until the cache links the material
    pub fn bindings(&self) -> &MaterialBindings {
        &self.bindings
    }
}

impl BinaryWrite for Material {
    fn write_to(&self, serializer: &mut Serializer) {
        serializer
            .write(&self.shader_program)
            .write(&self.diffuse)
            .write(&self.normal)
            .write(&self.base_color)
            .write(&self.roughness)
            .write(&self.metallic);
    }
}

impl BinaryRead for Material {
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
        let mut material = Material::new(
            deserializer.read()?,
            deserializer.read()?,
            deserializer.read()?,
        );
        material.base_color = deserializer.read()?;
        material.roughness = deserializer.read()?;
        material.metallic = deserializer.read()?;
        Ok(material)
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
