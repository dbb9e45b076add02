//! Editor-facing accessors over one cached resource
//!
//! A [`ResourceEditor`] borrows the manager for a single hash and exposes
//! the fields an inspector panel edits. Every edit marks the record unsaved;
//! built-in records reject edits.

use std::path::{Path, PathBuf};

use crate::engine_debug;
use crate::error::{Error, Result};
use crate::resource::{
    Resource, ResourceHash, ResourceManager, ShaderProgram, ShaderVariant, VariantSlot,
};

const SOURCE: &str = "nebula::ResourceEditor";

/// Mutable view of one live record
pub struct ResourceEditor<'a> {
    manager: &'a mut ResourceManager,
    hash: ResourceHash,
}

impl ResourceManager {
    /// Editor accessors for `hash`, if it is live
    pub fn editor(&mut self, hash: ResourceHash) -> Option<ResourceEditor<'_>> {
        if !self.contains(hash) {
            return None;
        }
        Some(ResourceEditor { manager: self, hash })
    }
}

impl<'a> ResourceEditor<'a> {
    pub fn hash(&self) -> ResourceHash {
        self.hash
    }

    pub fn resource(&self) -> Option<&Resource> {
        self.manager.resource(self.hash)
    }

    pub fn name(&self) -> &str {
        self.resource().map_or("", Resource::name)
    }

    pub fn path(&self) -> &Path {
        self.resource().map_or(Path::new(""), Resource::path)
    }

    pub fn is_saved(&self) -> bool {
        self.resource().map_or(true, Resource::is_saved)
    }

    pub fn can_be_edited(&self) -> bool {
        self.resource().map_or(false, Resource::can_be_edited)
    }

    fn editable(&mut self) -> Result<&mut Resource> {
        let hash = self.hash;
        let resource = self
            .manager
            .resource_mut(hash)
            .ok_or_else(|| Error::InvalidResource(format!("resource {} is not in the cache", hash)))?;
        if !resource.can_be_edited() {
            return Err(Error::InvalidResource(format!("built-in resource {} cannot be edited", hash)));
        }
        Ok(resource)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let resource = self.editable()?;
        let name = name.into();
        engine_debug!(SOURCE, "{} renamed to '{}'", resource.hash(), name);
        resource.set_name(name);
        Ok(())
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.editable()?.set_path(path);
        Ok(())
    }

    // ===== SHADER PROGRAMS =====

    fn program(&self) -> Result<&ShaderProgram> {
        self.resource()
            .and_then(|resource| resource.get::<ShaderProgram>())
            .ok_or_else(|| Error::InvalidResource(format!("resource {} is not a shader program", self.hash)))
    }

    /// Variant tag of a shader program (None for other kinds)
    pub fn variant(&self) -> Option<ShaderVariant> {
        self.program().ok().map(ShaderProgram::variant)
    }

    /// Entries of the variant combo box, in tag order
    pub fn variant_options(&self) -> Vec<(ShaderVariant, &'static str)> {
        ShaderVariant::ALL.iter().map(|variant| (*variant, variant.name())).collect()
    }

    /// Program currently held by a variant slot
    pub fn variant_slot(&self, slot: VariantSlot) -> Option<ResourceHash> {
        self.program().ok().and_then(|program| program.slot(slot))
    }

    /// Switch the program to another variant and rebuild its pipeline
    ///
    /// Rolls back to the previous pipeline when the rebuild fails.
    pub fn set_variant(&mut self, variant: ShaderVariant) -> Result<()> {
        let (vertex, fragment, geometry) = {
            let program = self.program()?;
            (program.vertex(), program.fragment(), program.geometry())
        };
        self.manager
            .create_shader_program(self.hash, vertex, fragment, geometry, variant)
    }

    pub fn set_variant_slot(&mut self, slot: VariantSlot, target: Option<ResourceHash>) -> Result<()> {
        self.manager.set_variant_slot(self.hash, slot, target)
    }

    /// Write the record to its cache file
    pub fn save(&mut self) -> Result<()> {
        self.manager.save_asset(self.hash)
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;
