/// Shader program resource
///
/// References one vertex and one fragment shader (plus an optional geometry
/// shader) by hash and owns the pipeline built from them. Alternate programs
/// for other passes hang off the variant slots.

use std::sync::Arc;

use crate::codec::{BinaryRead, BinaryWrite, Deserializer, Serializer};
use crate::error::Result;
use crate::graphics_device::Pipeline;
use crate::layout::UniformKind;
use crate::resource::{ResourceHash, ShaderVariant, VariantSlot};

#[derive(Debug)]
pub struct ShaderProgram {
    pub(crate) vertex: ResourceHash,
    pub(crate) fragment: ResourceHash,
    pub(crate) geometry: Option<ResourceHash>,
    pub(crate) variant: ShaderVariant,
    /// Slots as authored
    pub(crate) slots: [Option<ResourceHash>; VariantSlot::COUNT],
    /// Slots the cache linked; an authored slot stays unbound when its
    /// target cannot be used
    pub(crate) bound_slots: [Option<ResourceHash>; VariantSlot::COUNT],
    pub(crate) pipeline: Option<Arc<dyn Pipeline>>,
}

impl ShaderProgram {
    pub fn new(
        vertex: ResourceHash,
        fragment: ResourceHash,
        geometry: Option<ResourceHash>,
        variant: ShaderVariant,
    ) -> Self {
        Self {
            vertex,
            fragment,
            geometry,
            variant,
            slots: [None; VariantSlot::COUNT],
            bound_slots: [None; VariantSlot::COUNT],
            pipeline: None,
        }
    }

    pub fn vertex(&self) -> ResourceHash {
        self.vertex
    }

    pub fn fragment(&self) -> ResourceHash {
        self.fragment
    }

    pub fn geometry(&self) -> Option<ResourceHash> {
        self.geometry
    }

    pub fn variant(&self) -> ShaderVariant {
        self.variant
    }

    pub fn uniform_kind(&self) -> UniformKind {
        self.variant.uniform_kind()
    }

    pub fn slot(&self, slot: VariantSlot) -> Option<ResourceHash> {
        self.slots[slot.index()]
    }

    /// Program the slot resolves to at runtime
    pub fn bound_slot(&self, slot: VariantSlot) -> Option<ResourceHash> {
        self.bound_slots[slot.index()]
    }

    /// Set a slot without touching reference counts (used before linking)
    pub fn with_slot(mut self, slot: VariantSlot, program: Option<ResourceHash>) -> Self {
        self.slots[slot.index()] = program;
        self
    }

    pub fn pipeline(&self) -> Option<&Arc<dyn Pipeline>> {
        self.pipeline.as_ref()
    }

    /// Shader references, vertex first
    pub fn shaders(&self) -> Vec<ResourceHash> {
        let mut shaders = vec![self.vertex, self.fragment];
        shaders.extend(self.geometry);
        shaders
    }

    pub(crate) fn release_gpu(&mut self) {
        self.pipeline = None;
    }
}

impl BinaryWrite for ShaderProgram {
    fn write_to(&self, serializer: &mut Serializer) {
        serializer
            .write(&self.vertex)
            .write(&self.fragment)
            .write(&self.geometry)
            .write(&self.variant);
        for slot in &self.slots {
            serializer.write(slot);
        }
    }
}

impl BinaryRead for ShaderProgram {
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
        let vertex = deserializer.read::<ResourceHash>()?;
        let fragment = deserializer.read::<ResourceHash>()?;
        let geometry = deserializer.read::<Option<ResourceHash>>()?;
        let variant = deserializer.read::<ShaderVariant>()?;

        let mut program = ShaderProgram::new(vertex, fragment, geometry, variant);
        for slot in program.slots.iter_mut() {
            *slot = deserializer.read::<Option<ResourceHash>>()?;
        }
        Ok(program)
    }
}
