/// Resource records
///
/// A record is the unit the cache stores: identity, editor-facing metadata,
/// dirty/loaded flags and a payload from a closed set of resource types.
///
/// Persisted form:
///
/// ```text
/// [kind: u8] [name: string] [path: string] [payload fields ...]
/// ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::codec::{BinaryRead, Deserializer, Serializer};
use crate::error::{Error, Result};
use crate::resource::{
    ResourceHash, ResourceKind,
    Shader, ShaderProgram, TextureSampler, StaticTexture, CubeMap, Material,
};

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

fn next_instance_id() -> u64 {
    NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed)
}

// ===== RESOURCE DATA =====

/// Payload of a resource record
#[derive(Debug)]
pub enum ResourceData {
    Shader(Shader),
    ShaderProgram(ShaderProgram),
    Sampler(TextureSampler),
    Texture(StaticTexture),
    CubeMap(CubeMap),
    Material(Material),
}

impl ResourceData {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceData::Shader(shader) => ResourceKind::for_shader_stage(shader.stage()),
            ResourceData::ShaderProgram(_) => ResourceKind::ShaderProgram,
            ResourceData::Sampler(_) => ResourceKind::TextureSampler,
            ResourceData::Texture(_) => ResourceKind::StaticTexture,
            ResourceData::CubeMap(_) => ResourceKind::CubeMap,
            ResourceData::Material(_) => ResourceKind::Material,
        }
    }

    /// Every resource this payload references as authored, one entry per
    /// reference
    pub fn references(&self) -> Vec<ResourceHash> {
        let mut references = Vec::new();
        match self {
            ResourceData::Shader(_) | ResourceData::Sampler(_) => {}
            ResourceData::ShaderProgram(program) => {
                references.extend(program.shaders());
                references.extend(program.slots.iter().flatten());
            }
            ResourceData::Texture(texture) => references.push(texture.sampler),
            ResourceData::CubeMap(cube_map) => references.push(cube_map.sampler),
            ResourceData::Material(material) => {
                references.push(material.shader_program);
                references.push(material.diffuse);
                references.push(material.normal);
            }
        }
        references.retain(|hash| !hash.is_null());
        references
    }

    /// Forget the links made by the cache; authored references are kept
    pub(crate) fn unbind(&mut self) {
        match self {
            ResourceData::Shader(_) | ResourceData::Sampler(_) => {}
            ResourceData::ShaderProgram(program) => program.bound_slots = Default::default(),
            ResourceData::Texture(texture) => texture.bound_sampler = ResourceHash::NULL,
            ResourceData::CubeMap(cube_map) => cube_map.bound_sampler = ResourceHash::NULL,
            ResourceData::Material(material) => material.bindings = Default::default(),
        }
    }

    /// Drop every GPU object held by the payload
    pub(crate) fn release_gpu(&mut self) {
        match self {
            ResourceData::Shader(shader) => shader.release_gpu(),
            ResourceData::ShaderProgram(program) => program.release_gpu(),
            ResourceData::Sampler(sampler) => sampler.release_gpu(),
            ResourceData::Texture(texture) => texture.release_gpu(),
            ResourceData::CubeMap(cube_map) => cube_map.release_gpu(),
            ResourceData::Material(_) => {}
        }
    }

    fn write_payload(&self, serializer: &mut Serializer) {
        match self {
            ResourceData::Shader(shader) => serializer.write(shader),
            ResourceData::ShaderProgram(program) => serializer.write(program),
            ResourceData::Sampler(sampler) => serializer.write(sampler),
            ResourceData::Texture(texture) => serializer.write(texture),
            ResourceData::CubeMap(cube_map) => serializer.write(cube_map),
            ResourceData::Material(material) => serializer.write(material),
        };
    }

    fn read_payload(kind: ResourceKind, deserializer: &mut Deserializer<'_>) -> Result<Self> {
        Ok(match kind {
            ResourceKind::VertexShader
            | ResourceKind::FragmentShader
            | ResourceKind::GeometryShader => {
                let stage = kind.shader_stage().ok_or_else(|| {
                    Error::Format(format!("{} is not a shader kind", kind.name()))
                })?;
                ResourceData::Shader(Shader::read(stage, deserializer)?)
            }
            ResourceKind::ShaderProgram => ResourceData::ShaderProgram(ShaderProgram::read_from(deserializer)?),
            ResourceKind::TextureSampler => ResourceData::Sampler(TextureSampler::read_from(deserializer)?),
            ResourceKind::StaticTexture => ResourceData::Texture(StaticTexture::read_from(deserializer)?),
            ResourceKind::CubeMap => ResourceData::CubeMap(CubeMap::read_from(deserializer)?),
            ResourceKind::Material => ResourceData::Material(Material::read_from(deserializer)?),
        })
    }
}

// ===== TYPED ACCESS =====

/// Payload types that can be viewed through [`ResourceData`]
pub trait ResourceType: Sized {
    /// Human readable type name (for logs)
    const TYPE_NAME: &'static str;

    fn from_data(data: &ResourceData) -> Option<&Self>;

    fn from_data_mut(data: &mut ResourceData) -> Option<&mut Self>;
}

macro_rules! impl_resource_type {
    ($ty:ty, $variant:ident, $name:expr) => {
        impl ResourceType for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_data(data: &ResourceData) -> Option<&Self> {
                match data {
                    ResourceData::$variant(value) => Some(value),
                    _ => None,
                }
            }

            fn from_data_mut(data: &mut ResourceData) -> Option<&mut Self> {
                match data {
                    ResourceData::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

impl_resource_type!(Shader, Shader, "Shader");
impl_resource_type!(ShaderProgram, ShaderProgram, "ShaderProgram");
impl_resource_type!(TextureSampler, Sampler, "TextureSampler");
impl_resource_type!(StaticTexture, Texture, "StaticTexture");
impl_resource_type!(CubeMap, CubeMap, "CubeMap");
impl_resource_type!(Material, Material, "Material");

// ===== RESOURCE =====

/// A cached resource record
#[derive(Debug)]
pub struct Resource {
    hash: ResourceHash,
    name: String,
    path: PathBuf,
    pub(crate) is_loaded: bool,
    pub(crate) is_saved: bool,
    instance_id: u64,
    pub(crate) data: Option<ResourceData>,
}

impl Resource {
    /// New record, not yet loaded; `data` is None for records that failed to decode
    pub fn new(hash: ResourceHash, name: impl Into<String>, path: impl Into<PathBuf>, data: Option<ResourceData>) -> Self {
        Self {
            hash,
            name: name.into(),
            path: path.into(),
            is_loaded: false,
            is_saved: true,
            instance_id: next_instance_id(),
            data,
        }
    }

    pub fn hash(&self) -> ResourceHash {
        self.hash
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source asset path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// GPU-side construction succeeded and every reference is wired
    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// In-memory state matches the cache file
    pub fn is_saved(&self) -> bool {
        self.is_saved
    }

    /// Built-ins are read-only
    pub fn can_be_edited(&self) -> bool {
        !self.hash.is_builtin()
    }

    /// Process-unique serial of this construction
    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    pub fn kind(&self) -> Option<ResourceKind> {
        self.data.as_ref().map(ResourceData::kind)
    }

    pub fn data(&self) -> Option<&ResourceData> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut ResourceData> {
        self.data.as_mut()
    }

    /// Typed view of the payload
    pub fn get<T: ResourceType>(&self) -> Option<&T> {
        self.data.as_ref().and_then(T::from_data)
    }

    pub fn get_mut<T: ResourceType>(&mut self) -> Option<&mut T> {
        self.data.as_mut().and_then(T::from_data_mut)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.is_saved = false;
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
        self.is_saved = false;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.is_saved = false;
    }

    pub(crate) fn release_gpu(&mut self) {
        if let Some(data) = self.data.as_mut() {
            data.release_gpu();
        }
        self.is_loaded = false;
    }

    /// Encode the record in its persisted form
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let data = self.data.as_ref().ok_or_else(|| {
            Error::InvalidResource(format!("resource {} has no content to save", self.hash))
        })?;

        let path = self.path.to_string_lossy().into_owned();
        let mut serializer = Serializer::new();
        serializer
            .write(&data.kind().as_u8())
            .write(&self.name)
            .write(&path);
        data.write_payload(&mut serializer);
        Ok(serializer.into_bytes())
    }

    /// Decode a persisted record
    ///
    /// The returned record is not loaded: references and GPU objects are
    /// wired by the cache.
    pub fn from_bytes(hash: ResourceHash, bytes: &[u8]) -> Result<Self> {
        let mut deserializer = Deserializer::new(bytes);

        let tag = deserializer.read::<u8>()?;
        let kind = ResourceKind::from_u8(tag)
            .ok_or_else(|| Error::Format(format!("unknown resource kind {}", tag)))?;
        let name = deserializer.read::<String>()?;
        let path = deserializer.read::<String>()?;
        let data = ResourceData::read_payload(kind, &mut deserializer)?;

        if !deserializer.is_empty() {
            return Err(Error::Format(format!(
                "{} trailing byte(s) after {} record",
                deserializer.remaining(),
                kind.name()
            )));
        }

        Ok(Self::new(hash, name, PathBuf::from(path), Some(data)))
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
