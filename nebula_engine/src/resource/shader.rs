/// Shader resource
///
/// Holds the GLSL source and, once compiled, its bytecode. The GPU module is
/// created by the resource manager and dropped before the record goes away.

use std::sync::Arc;

use crate::codec::{BinaryWrite, Deserializer, Serializer};
use crate::error::Result;
use crate::graphics_device::{ShaderModule, ShaderStage};

#[derive(Debug)]
pub struct Shader {
    stage: ShaderStage,
    /// GLSL source text
    pub source: String,
    /// Compiled SPIR-V (empty until compiled)
    pub bytecode: Vec<u8>,
    module: Option<Arc<dyn ShaderModule>>,
}

impl Shader {
    pub fn new(stage: ShaderStage, source: impl Into<String>) -> Self {
        Self {
            stage,
            source: source.into(),
            bytecode: Vec::new(),
            module: None,
        }
    }

    /// Shader with precompiled bytecode
    pub fn from_bytecode(stage: ShaderStage, source: impl Into<String>, bytecode: Vec<u8>) -> Self {
        Self {
            stage,
            source: source.into(),
            bytecode,
            module: None,
        }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn module(&self) -> Option<&Arc<dyn ShaderModule>> {
        self.module.as_ref()
    }

    pub(crate) fn set_module(&mut self, module: Arc<dyn ShaderModule>) {
        self.module = Some(module);
    }

    pub(crate) fn release_gpu(&mut self) {
        self.module = None;
    }

    /// Decode the fields following the record header; the stage comes from the kind tag
    pub(crate) fn read(stage: ShaderStage, deserializer: &mut Deserializer<'_>) -> Result<Self> {
        let source = deserializer.read::<String>()?;
        let bytecode = deserializer.read::<Vec<u8>>()?;
        Ok(Self::from_bytecode(stage, source, bytecode))
    }
}

impl BinaryWrite for Shader {
    fn write_to(&self, serializer: &mut Serializer) {
        serializer.write(&self.source).write(&self.bytecode);
    }
}
