//! Project settings persisted next to the resource cache
//!
//! The settings file holds, in order: window resolution (two `u32`), the
//! full-screen flag, the default scene hash, then the post-processing
//! settings as a length-prefixed blob. An empty blob stands for the default
//! post-processing settings.

use std::fs;
use std::path::Path;
use glam::UVec2;

use crate::codec::{BinaryRead, BinaryWrite, Deserializer, Serializer};
use crate::error::{Error, Result};
use crate::resource::{ResourceHash, ResourceManager};
use crate::{engine_info, engine_warn};

const SOURCE: &str = "nebula::ProjectSettings";

// ===== POST-PROCESSING =====

/// Tone mapping and screen effects applied by the post-process pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostProcessSettings {
    /// Exposure multiplier before tone mapping
    pub exposure: f32,
    /// Output gamma
    pub gamma: f32,
    pub bloom_enabled: bool,
    /// Luminance above which pixels contribute to bloom
    pub bloom_threshold: f32,
    /// Vignette strength (0 = disabled)
    pub vignette: f32,
}

impl Default for PostProcessSettings {
    fn default() -> Self {
        Self {
            exposure: 1.0,
            gamma: 2.2,
            bloom_enabled: false,
            bloom_threshold: 1.0,
            vignette: 0.0,
        }
    }
}

impl PostProcessSettings {
    /// Encode as the blob stored in the project settings
    pub fn to_blob(&self) -> Vec<u8> {
        let mut serializer = Serializer::with_capacity(17);
        serializer
            .write(&self.exposure)
            .write(&self.gamma)
            .write(&self.bloom_enabled)
            .write(&self.bloom_threshold)
            .write(&self.vignette);
        serializer.into_bytes()
    }

    /// Decode a blob; an empty blob yields the defaults
    pub fn from_blob(blob: &[u8]) -> Result<Self> {
        if blob.is_empty() {
            return Ok(Self::default());
        }

        let mut de = Deserializer::new(blob);
        let settings = Self {
            exposure: de.read()?,
            gamma: de.read()?,
            bloom_enabled: de.read()?,
            bloom_threshold: de.read()?,
            vignette: de.read()?,
        };
        if !de.is_empty() {
            return Err(Error::Format(format!(
                "{} trailing byte(s) after post-process settings",
                de.remaining()
            )));
        }
        Ok(settings)
    }
}

// ===== PROJECT SETTINGS =====

/// Per-project settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    /// Window resolution in pixels
    pub resolution: UVec2,
    pub full_screen: bool,
    /// Scene opened at startup (NULL = none)
    pub default_scene: ResourceHash,
    /// Encoded [`PostProcessSettings`], kept opaque so unknown content survives a round trip
    pub post_process: Vec<u8>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            resolution: UVec2::new(1280, 720),
            full_screen: false,
            default_scene: ResourceHash::NULL,
            post_process: Vec::new(),
        }
    }
}

impl BinaryWrite for ProjectSettings {
    fn write_to(&self, serializer: &mut Serializer) {
        serializer
            .write(&self.resolution)
            .write(&self.full_screen)
            .write(&self.default_scene)
            .write_blob(&self.post_process);
    }
}

impl BinaryRead for ProjectSettings {
    fn read_from(de: &mut Deserializer<'_>) -> Result<Self> {
        Ok(Self {
            resolution: de.read()?,
            full_screen: de.read()?,
            default_scene: de.read()?,
            post_process: de.read_blob()?.to_vec(),
        })
    }
}

impl ProjectSettings {
    /// Decoded post-processing settings
    pub fn post_process_settings(&self) -> Result<PostProcessSettings> {
        PostProcessSettings::from_blob(&self.post_process)
    }

    pub fn set_post_process_settings(&mut self, settings: &PostProcessSettings) {
        self.post_process = settings.to_blob();
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut serializer = Serializer::new();
        serializer.write(self);
        serializer.into_bytes()
    }

    /// Decode a whole settings file; trailing bytes are a format error
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut de = Deserializer::new(bytes);
        let settings = de.read::<Self>()?;
        if !de.is_empty() {
            return Err(Error::Format(format!(
                "{} trailing byte(s) after project settings",
                de.remaining()
            )));
        }
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_bytes())?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Load `path`, falling back to the defaults when it is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            engine_info!(SOURCE, "No project settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                engine_warn!(SOURCE, "Project settings {} unreadable, using defaults: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

impl ResourceManager {
    /// Project settings stored in the cache directory
    pub fn load_project_settings(&self) -> ProjectSettings {
        ProjectSettings::load_or_default(&self.config().project_settings_path())
    }

    pub fn save_project_settings(&self, settings: &ProjectSettings) -> Result<()> {
        settings.save(&self.config().project_settings_path())
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
