/// Central resource cache of the engine.
///
/// Owns every live resource record, indexed by hash. Records are loaded
/// lazily from `<cache_dir>/<hash>.res`, linked to the records they
/// reference and reference counted. Cross-references are plain hashes
/// resolved through the cache; each one holds a reference on its target.
///
/// Lifecycle of a user record:
///
/// ```text
/// load(h) -> read file -> decode -> link references -> build GPU objects
///         -> registered (ref_count = 1, is_loaded = true)
/// release(h) at zero -> drop GPU objects -> remove -> release references
/// ```
///
/// A record that cannot be decoded or built is still registered, with
/// `is_loaded == false`, so the editor can inspect and repair it.

use std::fs;
use std::mem;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, ShaderModule, ShaderModuleDesc, ShaderStage,
    Pipeline, PipelineDesc, TextureDesc, TextureType,
};
use crate::layout::UniformLayouts;
use crate::resource::{
    BuiltinResource, MaterialBindings, Resource, ResourceData, ResourceHash, ResourceType,
    Shader, ShaderProgram, ShaderVariant, VariantSlot, BUILTIN_HASH_THRESHOLD,
};
use crate::shader_compiler::ShaderCompiler;
use crate::{engine_debug, engine_error, engine_info, engine_warn};

const SOURCE: &str = "nebula::ResourceManager";

// ===== CONFIGURATION =====

/// Location and naming of the resource cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceManagerConfig {
    /// Directory holding one file per resource
    pub cache_dir: PathBuf,
    /// Extension of resource files (without the dot)
    pub extension: String,
    /// Name of the project settings file inside `cache_dir`
    pub project_settings_file: String,
}

impl Default for ResourceManagerConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            extension: "res".to_string(),
            project_settings_file: "project.settings".to_string(),
        }
    }
}

impl ResourceManagerConfig {
    /// Default naming inside the given directory
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            ..Self::default()
        }
    }

    /// Cache file of a resource
    pub fn resource_path(&self, hash: ResourceHash) -> PathBuf {
        self.cache_dir.join(hash.file_name(&self.extension))
    }

    pub fn project_settings_path(&self) -> PathBuf {
        self.cache_dir.join(&self.project_settings_file)
    }
}

// ===== CACHE ENTRY =====

#[derive(Debug)]
struct CacheEntry {
    resource: Resource,
    ref_count: u32,
    /// Built-ins are never removed by release
    pinned: bool,
    /// References this record holds, one entry per acquired reference
    dependencies: Vec<ResourceHash>,
}

fn is_shader(data: &ResourceData, stage: ShaderStage) -> bool {
    matches!(data, ResourceData::Shader(shader) if shader.stage() == stage)
}

fn is_program(data: &ResourceData) -> bool {
    matches!(data, ResourceData::ShaderProgram(_))
}

fn is_sampler(data: &ResourceData) -> bool {
    matches!(data, ResourceData::Sampler(_))
}

fn is_texture(data: &ResourceData) -> bool {
    matches!(data, ResourceData::Texture(_))
}

/// Outcome of linking one variant slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotLink {
    /// Reference acquired
    Bound,
    /// Target is a program of the owner's own variant
    SameVariant,
    /// Target is missing, broken, not a program or still being loaded
    Unusable,
}

// ===== RESOURCE MANAGER =====

/// Content-addressed resource cache
pub struct ResourceManager {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    compiler: Box<dyn ShaderCompiler>,
    config: ResourceManagerConfig,
    entries: FxHashMap<ResourceHash, CacheEntry>,
    /// Write-once fallback of variant resolution
    default_shader: Option<ResourceHash>,
    uniform_layouts: UniformLayouts,
    /// Records being linked, to break reference cycles
    loading: FxHashSet<ResourceHash>,
}

impl ResourceManager {
    /// Create an empty cache bound to `device`
    ///
    /// Creates the descriptor set layouts of every uniform kind, with
    /// offsets computed for this device.
    pub fn new(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        compiler: Box<dyn ShaderCompiler>,
        config: ResourceManagerConfig,
    ) -> Result<Self> {
        let mut uniform_layouts = UniformLayouts::new();
        {
            let mut guard = device
                .lock()
                .map_err(|_| Error::BackendError("graphics device mutex poisoned".to_string()))?;
            uniform_layouts.create_all(&mut *guard)?;
        }

        Ok(Self {
            device,
            compiler,
            config,
            entries: FxHashMap::default(),
            default_shader: None,
            uniform_layouts,
            loading: FxHashSet::default(),
        })
    }

    pub fn config(&self) -> &ResourceManagerConfig {
        &self.config
    }

    pub fn device(&self) -> &Arc<Mutex<dyn GraphicsDevice>> {
        &self.device
    }

    pub fn uniform_layouts(&self) -> &UniformLayouts {
        &self.uniform_layouts
    }

    fn lock_device(&self) -> Result<MutexGuard<'_, dyn GraphicsDevice + 'static>> {
        self.device
            .lock()
            .map_err(|_| Error::BackendError("graphics device mutex poisoned".to_string()))
    }

    // ===== LOOKUP =====

    /// Whether a record is live for `hash`
    pub fn contains(&self, hash: ResourceHash) -> bool {
        self.entries.contains_key(&hash)
    }

    /// Number of live records, built-ins included
    pub fn resource_count(&self) -> usize {
        self.entries.len()
    }

    /// Current reference count (0 when not live)
    pub fn ref_count(&self, hash: ResourceHash) -> u32 {
        self.entries.get(&hash).map_or(0, |entry| entry.ref_count)
    }

    /// Every live hash, sorted
    pub fn hashes(&self) -> Vec<ResourceHash> {
        let mut hashes: Vec<ResourceHash> = self.entries.keys().copied().collect();
        hashes.sort();
        hashes
    }

    /// Look up a live record without acquiring a reference
    pub fn resource(&self, hash: ResourceHash) -> Option<&Resource> {
        self.entries.get(&hash).map(|entry| &entry.resource)
    }

    /// Mutable lookup without acquiring a reference
    ///
    /// Cross-references must be changed through the manager
    /// (`create_shader_program`, `set_variant_slot`) so reference counts
    /// stay consistent.
    pub fn resource_mut(&mut self, hash: ResourceHash) -> Option<&mut Resource> {
        self.entries.get_mut(&hash).map(|entry| &mut entry.resource)
    }

    fn program(&self, hash: ResourceHash) -> Option<&ShaderProgram> {
        self.resource(hash).and_then(|resource| resource.get::<ShaderProgram>())
    }

    // ===== LOAD / RELEASE =====

    /// Acquire a reference on `hash`, loading it from the cache directory if needed
    ///
    /// Returns None (after a warning) when the file does not exist. A file
    /// that cannot be decoded or built still yields a registered record with
    /// `is_loaded == false`.
    pub fn load(&mut self, hash: ResourceHash) -> Option<&Resource> {
        if hash.is_null() {
            return None;
        }

        if self.entries.contains_key(&hash) {
            let entry = self.entries.get_mut(&hash)?;
            entry.ref_count += 1;
            return Some(&entry.resource);
        }

        if hash.is_builtin() {
            engine_warn!(SOURCE, "Built-in resource {} is not initialized", hash);
            return None;
        }
        if self.loading.contains(&hash) {
            engine_warn!(SOURCE, "Cyclic reference to {} ignored", hash);
            return None;
        }

        let path = self.config.resource_path(hash);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                engine_warn!(SOURCE, "Cannot read resource {} ({}): {}", hash, path.display(), e);
                return None;
            }
        };

        self.loading.insert(hash);
        let (resource, dependencies) = self.construct(hash, &bytes);
        self.loading.remove(&hash);

        self.entries.insert(hash, CacheEntry {
            resource,
            ref_count: 1,
            pinned: false,
            dependencies,
        });
        self.entries.get(&hash).map(|entry| &entry.resource)
    }

    /// Typed `load`
    ///
    /// Asking for the wrong type is a caller bug: it is logged as an error,
    /// the reference is released again and None is returned.
    pub fn get<T: ResourceType>(&mut self, hash: ResourceHash) -> Option<&T> {
        let (kind, matches) = {
            let resource = self.load(hash)?;
            (resource.kind(), resource.get::<T>().is_some())
        };

        if !matches {
            if let Some(kind) = kind {
                engine_error!(SOURCE, "Resource {} is a {}, not a {}", hash, kind.name(), T::TYPE_NAME);
            }
            self.release(hash);
            return None;
        }

        self.entries.get(&hash).and_then(|entry| entry.resource.get::<T>())
    }

    /// Drop one reference on `hash`
    ///
    /// At zero the record's GPU objects are dropped, the record is removed
    /// and the references it held are released in turn. NULL and unknown
    /// hashes are ignored; built-ins stay alive.
    pub fn release(&mut self, hash: ResourceHash) {
        let mut pending = vec![hash];

        while let Some(hash) = pending.pop() {
            let Some(entry) = self.entries.get_mut(&hash) else {
                continue;
            };

            if entry.pinned {
                if entry.ref_count > 1 {
                    entry.ref_count -= 1;
                }
                continue;
            }

            entry.ref_count = entry.ref_count.saturating_sub(1);
            if entry.ref_count > 0 {
                continue;
            }

            if let Some(mut entry) = self.entries.remove(&hash) {
                entry.resource.release_gpu();
                engine_debug!(SOURCE, "Released {} '{}'", hash, entry.resource.name());
                pending.extend(entry.dependencies);
            }
        }
    }

    /// Decode, link and build a record read from disk
    fn construct(&mut self, hash: ResourceHash, bytes: &[u8]) -> (Resource, Vec<ResourceHash>) {
        let mut resource = match Resource::from_bytes(hash, bytes) {
            Ok(resource) => resource,
            Err(e) => {
                engine_warn!(SOURCE, "Resource {} is corrupt: {}", hash, e);
                return (Resource::new(hash, "", "", None), Vec::new());
            }
        };

        let Some(mut data) = resource.data.take() else {
            return (resource, Vec::new());
        };
        let compiled_now = matches!(&data, ResourceData::Shader(shader) if shader.bytecode.is_empty());

        match self.link_and_build(hash, &mut data) {
            Ok(dependencies) => {
                resource.data = Some(data);
                resource.is_loaded = true;
                if compiled_now {
                    // bytecode is persisted on the next save
                    resource.mark_dirty();
                }
                engine_debug!(SOURCE, "Loaded {} '{}'", hash, resource.name());
                (resource, dependencies)
            }
            Err(e) => {
                engine_warn!(SOURCE, "Resource {} '{}' failed to load: {}", hash, resource.name(), e);
                resource.data = Some(data);
                (resource, Vec::new())
            }
        }
    }

    // ===== LINKING =====

    /// Acquire a reference on `hash` if it is loaded and accepted
    ///
    /// A rejected target is released again.
    fn acquire<F: Fn(&ResourceData) -> bool>(&mut self, hash: ResourceHash, accept: F) -> bool {
        let accepted = match self.load(hash) {
            Some(resource) => resource.is_loaded() && resource.data().map_or(false, &accept),
            None => return false,
        };
        if !accepted {
            self.release(hash);
        }
        accepted
    }

    /// Acquire `hash`, or `fallback` when `hash` cannot be resolved
    fn acquire_or_fallback<F: Fn(&ResourceData) -> bool>(
        &mut self,
        owner: ResourceHash,
        hash: ResourceHash,
        fallback: ResourceHash,
        accept: F,
        acquired: &mut Vec<ResourceHash>,
    ) -> Result<ResourceHash> {
        if !hash.is_null() {
            if self.acquire(hash, &accept) {
                acquired.push(hash);
                return Ok(hash);
            }
            engine_warn!(SOURCE, "{}: reference {} cannot be resolved, using {}", owner, hash, fallback);
        }

        if self.acquire(fallback, &accept) {
            acquired.push(fallback);
            Ok(fallback)
        } else {
            Err(Error::MissingReference(if hash.is_null() { fallback } else { hash }))
        }
    }

    /// Acquire a variant slot target for a program of `variant`
    ///
    /// Only `Bound` leaves a reference held.
    fn link_slot(&mut self, target: ResourceHash, variant: ShaderVariant) -> SlotLink {
        let target_variant = match self.load(target) {
            Some(resource) if resource.is_loaded() => {
                resource.get::<ShaderProgram>().map(ShaderProgram::variant)
            }
            Some(_) => None,
            None => return SlotLink::Unusable,
        };

        match target_variant {
            Some(target_variant) if target_variant != variant => SlotLink::Bound,
            Some(_) => {
                self.release(target);
                SlotLink::SameVariant
            }
            None => {
                self.release(target);
                SlotLink::Unusable
            }
        }
    }

    /// Resolve the references of `data`, then create its GPU objects
    ///
    /// Returns the references acquired. On failure every acquired reference
    /// is released again and no GPU object is left behind.
    fn link_and_build(&mut self, hash: ResourceHash, data: &mut ResourceData) -> Result<Vec<ResourceHash>> {
        let mut acquired = Vec::new();
        let result = self
            .link(hash, data, &mut acquired)
            .and_then(|()| self.build_gpu(hash, data));

        match result {
            Ok(()) => Ok(acquired),
            Err(e) => {
                data.release_gpu();
                data.unbind();
                for dependency in acquired {
                    self.release(dependency);
                }
                Err(e)
            }
        }
    }

    fn link(&mut self, hash: ResourceHash, data: &mut ResourceData, acquired: &mut Vec<ResourceHash>) -> Result<()> {
        match data {
            ResourceData::Shader(_) | ResourceData::Sampler(_) => Ok(()),

            ResourceData::ShaderProgram(program) => {
                let mut shaders = vec![
                    (program.vertex, ShaderStage::Vertex),
                    (program.fragment, ShaderStage::Fragment),
                ];
                shaders.extend(program.geometry.map(|geometry| (geometry, ShaderStage::Geometry)));

                for (shader, stage) in shaders {
                    if !self.acquire(shader, |candidate| is_shader(candidate, stage)) {
                        return Err(Error::MissingReference(shader));
                    }
                    acquired.push(shader);
                }

                let variant = program.variant;
                for slot in VariantSlot::ALL {
                    program.bound_slots[slot.index()] = None;
                    let Some(target) = program.slots[slot.index()] else {
                        continue;
                    };
                    match self.link_slot(target, variant) {
                        SlotLink::Bound => {
                            acquired.push(target);
                            program.bound_slots[slot.index()] = Some(target);
                        }
                        SlotLink::SameVariant | SlotLink::Unusable => {
                            engine_warn!(SOURCE, "{}: {:?} slot {} is not a usable program, left unbound", hash, slot, target);
                        }
                    }
                }
                Ok(())
            }

            ResourceData::Texture(texture) => {
                texture.bound_sampler = self.acquire_or_fallback(
                    hash,
                    texture.sampler,
                    BuiltinResource::DefaultSampler.hash(),
                    is_sampler,
                    acquired,
                )?;
                Ok(())
            }

            ResourceData::CubeMap(cube_map) => {
                cube_map.bound_sampler = self.acquire_or_fallback(
                    hash,
                    cube_map.sampler,
                    BuiltinResource::DefaultSampler.hash(),
                    is_sampler,
                    acquired,
                )?;
                Ok(())
            }

            ResourceData::Material(material) => {
                let default_shader = self.default_shader.unwrap_or(ResourceHash::NULL);
                let debug_texture = BuiltinResource::DebugTexture.hash();
                let mut bindings = MaterialBindings::default();

                bindings.shader_program = self.acquire_or_fallback(
                    hash,
                    material.shader_program,
                    default_shader,
                    is_program,
                    acquired,
                )?;
                if !material.diffuse.is_null() {
                    bindings.diffuse =
                        self.acquire_or_fallback(hash, material.diffuse, debug_texture, is_texture, acquired)?;
                }
                if !material.normal.is_null() {
                    bindings.normal =
                        self.acquire_or_fallback(hash, material.normal, debug_texture, is_texture, acquired)?;
                }
                material.bindings = bindings;
                Ok(())
            }
        }
    }

    // ===== GPU CONSTRUCTION =====

    fn build_gpu(&self, hash: ResourceHash, data: &mut ResourceData) -> Result<()> {
        match data {
            ResourceData::Shader(shader) => {
                if shader.bytecode.is_empty() {
                    self.compile_shader(hash, shader)?;
                }
                let module = self.lock_device()?.create_shader_module(ShaderModuleDesc {
                    code: &shader.bytecode,
                    stage: shader.stage(),
                    entry_point: "main".to_string(),
                })?;
                shader.set_module(module);
            }

            ResourceData::ShaderProgram(program) => {
                let pipeline = self.build_pipeline(
                    program.vertex,
                    program.fragment,
                    program.geometry,
                    program.variant,
                )?;
                program.pipeline = Some(pipeline);
            }

            ResourceData::Sampler(sampler) => {
                let gpu_sampler = self.lock_device()?.create_sampler(sampler.desc)?;
                sampler.set_sampler(gpu_sampler);
            }

            ResourceData::Texture(texture) => {
                if texture.width == 0 || texture.height == 0 || texture.pixels.len() != texture.expected_size() {
                    return Err(Error::InvalidResource(format!(
                        "texture {} is {}x{} but holds {} byte(s), expected {}",
                        hash, texture.width, texture.height, texture.pixels.len(), texture.expected_size()
                    )));
                }
                let gpu_texture = self.lock_device()?.create_texture(TextureDesc {
                    width: texture.width,
                    height: texture.height,
                    format: texture.format,
                    texture_type: TextureType::Tex2D,
                    data: Some(&texture.pixels),
                })?;
                texture.set_texture(gpu_texture);
            }

            ResourceData::CubeMap(cube_map) => {
                let face_size = cube_map.face_size();
                if cube_map.size == 0 || cube_map.faces.iter().any(|face| face.len() != face_size) {
                    return Err(Error::InvalidResource(format!(
                        "cube map {} faces must all be {} byte(s)",
                        hash, face_size
                    )));
                }
                let layers = cube_map.faces.concat();
                let gpu_texture = self.lock_device()?.create_texture(TextureDesc {
                    width: cube_map.size,
                    height: cube_map.size,
                    format: cube_map.format,
                    texture_type: TextureType::Cube,
                    data: Some(&layers),
                })?;
                cube_map.set_texture(gpu_texture);
            }

            ResourceData::Material(_) => {}
        }
        Ok(())
    }

    /// Compile GLSL source through the external compiler
    ///
    /// Source and output are written next to the cache files as
    /// `<hash>.<stage>` and `<hash>.<stage>.spv`.
    fn compile_shader(&self, hash: ResourceHash, shader: &mut Shader) -> Result<()> {
        if shader.source.is_empty() {
            return Err(Error::InvalidResource(format!(
                "shader {} has neither bytecode nor source",
                hash
            )));
        }

        fs::create_dir_all(&self.config.cache_dir)?;
        let source_name = hash.file_name(shader.stage().extension());
        let source_path = self.config.cache_dir.join(&source_name);
        let destination = self.config.cache_dir.join(format!("{}.spv", source_name));
        fs::write(&source_path, &shader.source)?;

        match self.compiler.compile(&source_path, &destination, shader.stage()) {
            Ok(bytecode) => {
                shader.bytecode = bytecode;
                Ok(())
            }
            Err(Error::ShaderCompilation { path, log }) => {
                engine_error!(SOURCE, "Shader {} failed to compile ({})", hash, path.display());
                for line in &log {
                    engine_error!(SOURCE, "    {}", line);
                }
                Err(Error::ShaderCompilation { path, log })
            }
            Err(e) => Err(e),
        }
    }

    fn shader_module(&self, hash: ResourceHash) -> Result<Arc<dyn ShaderModule>> {
        self.resource(hash)
            .and_then(|resource| resource.get::<Shader>())
            .and_then(|shader| shader.module().cloned())
            .ok_or(Error::MissingReference(hash))
    }

    fn build_pipeline(
        &self,
        vertex: ResourceHash,
        fragment: ResourceHash,
        geometry: Option<ResourceHash>,
        variant: ShaderVariant,
    ) -> Result<Arc<dyn Pipeline>> {
        let vertex_shader = self.shader_module(vertex)?;
        let fragment_shader = self.shader_module(fragment)?;
        let geometry_shader = geometry.map(|hash| self.shader_module(hash)).transpose()?;

        let kind = variant.uniform_kind();
        let layout = self
            .uniform_layouts
            .get(kind)
            .descriptor_set_layout()
            .cloned()
            .ok_or_else(|| Error::InitializationFailed(format!("uniform layout {:?} is not created", kind)))?;

        self.lock_device()?.create_pipeline(PipelineDesc {
            vertex_shader,
            fragment_shader,
            geometry_shader,
            descriptor_set_layouts: vec![layout],
            state: variant.pipeline_state(),
        })
    }

    // ===== CREATION / SAVE =====

    /// Register a record created by the editor
    ///
    /// References are linked and GPU objects built immediately. The record
    /// starts unsaved with one reference.
    pub fn insert(&mut self, hash: ResourceHash, name: impl Into<String>, data: ResourceData) -> Result<()> {
        if hash.0 < BUILTIN_HASH_THRESHOLD {
            return Err(Error::InvalidResource(format!("hash {} is reserved", hash)));
        }
        if self.entries.contains_key(&hash) {
            return Err(Error::InvalidResource(format!("resource {} already exists", hash)));
        }

        let mut data = data;
        self.loading.insert(hash);
        let linked = self.link_and_build(hash, &mut data);
        self.loading.remove(&hash);
        let dependencies = linked?;

        let mut resource = Resource::new(hash, name, "", Some(data));
        resource.is_loaded = true;
        resource.mark_dirty();

        self.entries.insert(hash, CacheEntry {
            resource,
            ref_count: 1,
            pinned: false,
            dependencies,
        });
        engine_debug!(SOURCE, "Inserted {}", hash);
        Ok(())
    }

    /// Write one record to its cache file
    pub fn save_asset(&mut self, hash: ResourceHash) -> Result<()> {
        if hash.is_builtin() {
            return Err(Error::InvalidResource(format!("built-in resource {} cannot be saved", hash)));
        }
        let entry = self
            .entries
            .get(&hash)
            .ok_or_else(|| Error::InvalidResource(format!("resource {} is not in the cache", hash)))?;
        let bytes = entry.resource.to_bytes()?;

        fs::create_dir_all(&self.config.cache_dir)?;
        fs::write(self.config.resource_path(hash), bytes)?;

        if let Some(entry) = self.entries.get_mut(&hash) {
            entry.resource.is_saved = true;
        }
        engine_debug!(SOURCE, "Saved {}", hash);
        Ok(())
    }

    /// Save every editable record with unsaved changes
    ///
    /// Returns the number of records written; failures are logged and skipped.
    pub fn save_all(&mut self) -> usize {
        let mut dirty: Vec<ResourceHash> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.resource.can_be_edited() && !entry.resource.is_saved())
            .map(|(hash, _)| *hash)
            .collect();
        dirty.sort();

        let mut saved = 0;
        for hash in dirty {
            match self.save_asset(hash) {
                Ok(()) => saved += 1,
                Err(e) => engine_warn!(SOURCE, "Cannot save {}: {}", hash, e),
            }
        }
        saved
    }

    // ===== BOOTSTRAP =====

    /// Create the built-ins, then load every user file of the cache directory
    ///
    /// Built-in failures are fatal. Files below the built-in threshold are
    /// never decoded; broken user files are warned about and skipped.
    /// Returns the number of user records that loaded.
    pub fn load_resources_already_cached(&mut self) -> Result<usize> {
        for builtin in BuiltinResource::ALL {
            self.register_builtin(builtin)?;
        }

        let cache_dir = self.config.cache_dir.clone();
        if !cache_dir.is_dir() {
            fs::create_dir_all(&cache_dir)?;
            engine_info!(SOURCE, "Created cache directory {}", cache_dir.display());
            return Ok(0);
        }

        let mut hashes = Vec::new();
        let mut skipped = 0usize;
        for dir_entry in fs::read_dir(&cache_dir)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(self.config.extension.as_str()) {
                continue;
            }
            let Some(hash) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(ResourceHash::from_file_stem)
            else {
                engine_warn!(SOURCE, "Ignoring unrecognized cache file {}", path.display());
                skipped += 1;
                continue;
            };
            if hash.0 < BUILTIN_HASH_THRESHOLD {
                engine_debug!(SOURCE, "Skipping reserved cache file {}", path.display());
                skipped += 1;
                continue;
            }
            hashes.push(hash);
        }
        hashes.sort();

        let (mut loaded, mut failed) = (0usize, 0usize);
        for hash in hashes {
            match self.load(hash).map(Resource::is_loaded) {
                Some(true) => loaded += 1,
                _ => failed += 1,
            }
        }

        engine_info!(
            SOURCE,
            "Cache warmed: {} built-in(s), {} loaded, {} failed, {} skipped",
            BuiltinResource::ALL.len(),
            loaded,
            failed,
            skipped
        );
        Ok(loaded)
    }

    fn register_builtin(&mut self, builtin: BuiltinResource) -> Result<()> {
        let hash = builtin.hash();
        if self.entries.contains_key(&hash) {
            return Ok(());
        }

        let mut data = builtin.initialize();
        if let Some(missing) = data.references().into_iter().find(|reference| !self.entries.contains_key(reference)) {
            return Err(Error::InitializationFailed(format!(
                "built-in '{}' ({}) references {} before it exists",
                builtin.name(), hash, missing
            )));
        }
        let dependencies = self.link_and_build(hash, &mut data).map_err(|e| {
            Error::InitializationFailed(format!("built-in '{}' ({}): {}", builtin.name(), hash, e))
        })?;

        let mut resource = Resource::new(hash, builtin.name(), "", Some(data));
        resource.is_loaded = true;
        self.entries.insert(hash, CacheEntry {
            resource,
            ref_count: 1,
            pinned: true,
            dependencies,
        });

        if builtin == BuiltinResource::DefaultShaderProgram {
            self.set_default_shader(hash);
        }
        Ok(())
    }

    // ===== SHADER VARIANTS =====

    /// Program used when a variant cannot be resolved
    pub fn default_shader(&self) -> Option<ResourceHash> {
        self.default_shader
    }

    /// Set the default shader program; only the first call takes effect
    pub fn set_default_shader(&mut self, hash: ResourceHash) -> bool {
        if let Some(current) = self.default_shader {
            engine_warn!(SOURCE, "Default shader already set to {}, ignoring {}", current, hash);
            return false;
        }
        self.default_shader = Some(hash);
        engine_debug!(SOURCE, "Default shader set to {}", hash);
        true
    }

    /// Program to draw `program` with in a `variant` pass
    ///
    /// `Default` is the program itself. Other variants use the program's
    /// slot when set and fall back to the default shader program otherwise.
    pub fn resolve_shader(&self, program: ResourceHash, variant: ShaderVariant) -> Result<ResourceHash> {
        if variant == ShaderVariant::Default {
            return Ok(program);
        }

        let slot_program = variant
            .slot()
            .and_then(|slot| self.program(program).and_then(|p| p.bound_slot(slot)));

        match slot_program {
            Some(target) => self.resolve_shader(target, ShaderVariant::Default),
            None => self.default_shader.ok_or_else(|| {
                Error::InitializationFailed("default shader program is not set".to_string())
            }),
        }
    }

    /// A program of `variant` holding `hash` in one of its slots
    fn slot_referrer(&self, hash: ResourceHash, variant: ShaderVariant) -> Option<(ResourceHash, VariantSlot)> {
        let mut referrers: Vec<(ResourceHash, VariantSlot)> = self
            .entries
            .iter()
            .filter(|(owner, _)| **owner != hash)
            .filter_map(|(owner, entry)| {
                let program = entry.resource.get::<ShaderProgram>()?;
                if program.variant() != variant {
                    return None;
                }
                VariantSlot::ALL
                    .into_iter()
                    .find(|slot| program.slot(*slot) == Some(hash))
                    .map(|slot| (*owner, slot))
            })
            .collect();
        referrers.sort_by_key(|(owner, _)| *owner);
        referrers.into_iter().next()
    }

    /// Rebuild a shader program from new shaders and variant
    ///
    /// The previous pipeline and references stay in place until the new
    /// pipeline is built; on failure the program is left untouched. Slots
    /// that would point at a program of the new variant are cleared. A
    /// variant change is rejected while a program of the new variant holds
    /// this one in a slot.
    pub fn create_shader_program(
        &mut self,
        hash: ResourceHash,
        vertex: ResourceHash,
        fragment: ResourceHash,
        geometry: Option<ResourceHash>,
        variant: ShaderVariant,
    ) -> Result<()> {
        let (current_variant, current_slots) = {
            let resource = self
                .resource(hash)
                .ok_or_else(|| Error::InvalidResource(format!("resource {} is not in the cache", hash)))?;
            if !resource.can_be_edited() {
                return Err(Error::InvalidResource(format!("built-in resource {} cannot be rebuilt", hash)));
            }
            let program = resource
                .get::<ShaderProgram>()
                .ok_or_else(|| Error::InvalidResource(format!("resource {} is not a shader program", hash)))?;
            (program.variant, program.slots)
        };

        if variant != current_variant {
            if let Some((referrer, slot)) = self.slot_referrer(hash, variant) {
                return Err(Error::InvalidResource(format!(
                    "{} is the {:?} slot of {}, which is a {} program too",
                    hash, slot, referrer, variant.name()
                )));
            }
        }

        let mut acquired = Vec::new();
        let mut shaders = vec![(vertex, ShaderStage::Vertex), (fragment, ShaderStage::Fragment)];
        shaders.extend(geometry.map(|geometry| (geometry, ShaderStage::Geometry)));
        for (shader, stage) in shaders {
            if !self.acquire(shader, |candidate| is_shader(candidate, stage)) {
                for dependency in acquired {
                    self.release(dependency);
                }
                return Err(Error::MissingReference(shader));
            }
            acquired.push(shader);
        }

        let mut slots = current_slots;
        let mut bound_slots = [None; VariantSlot::COUNT];
        for slot in VariantSlot::ALL {
            let Some(target) = current_slots[slot.index()] else {
                continue;
            };
            match self.link_slot(target, variant) {
                SlotLink::Bound => {
                    acquired.push(target);
                    bound_slots[slot.index()] = Some(target);
                }
                SlotLink::SameVariant => {
                    engine_warn!(SOURCE, "{}: {:?} slot {} dropped for variant {}", hash, slot, target, variant.name());
                    slots[slot.index()] = None;
                }
                SlotLink::Unusable => {
                    engine_warn!(SOURCE, "{}: {:?} slot {} is not a usable program, left unbound", hash, slot, target);
                }
            }
        }

        let pipeline = match self.build_pipeline(vertex, fragment, geometry, variant) {
            Ok(pipeline) => pipeline,
            Err(e) => {
                engine_warn!(SOURCE, "Rebuild of shader program {} failed, keeping the previous one: {}", hash, e);
                for dependency in acquired {
                    self.release(dependency);
                }
                return Err(e);
            }
        };

        let entry = self
            .entries
            .get_mut(&hash)
            .ok_or_else(|| Error::InvalidResource(format!("resource {} is not in the cache", hash)))?;
        let program = entry
            .resource
            .get_mut::<ShaderProgram>()
            .ok_or_else(|| Error::InvalidResource(format!("resource {} is not a shader program", hash)))?;
        program.vertex = vertex;
        program.fragment = fragment;
        program.geometry = geometry;
        program.variant = variant;
        program.slots = slots;
        program.bound_slots = bound_slots;
        // previous pipeline dropped here
        program.pipeline = Some(pipeline);

        entry.resource.is_loaded = true;
        entry.resource.mark_dirty();
        let previous = mem::replace(&mut entry.dependencies, acquired);

        for dependency in previous {
            self.release(dependency);
        }
        engine_debug!(SOURCE, "Rebuilt shader program {} ({})", hash, variant.name());
        Ok(())
    }

    /// Point a variant slot of `program` at another program, or clear it
    ///
    /// The target must be a shader program of a different variant.
    pub fn set_variant_slot(&mut self, program: ResourceHash, slot: VariantSlot, target: Option<ResourceHash>) -> Result<()> {
        let variant = {
            let resource = self
                .resource(program)
                .ok_or_else(|| Error::InvalidResource(format!("resource {} is not in the cache", program)))?;
            if !resource.can_be_edited() {
                return Err(Error::InvalidResource(format!("built-in resource {} cannot be edited", program)));
            }
            resource
                .get::<ShaderProgram>()
                .ok_or_else(|| Error::InvalidResource(format!("resource {} is not a shader program", program)))?
                .variant()
        };

        if let Some(target) = target {
            if target == program {
                return Err(Error::InvalidResource(format!("program {} cannot be its own variant", program)));
            }
            match self.link_slot(target, variant) {
                SlotLink::Bound => {}
                SlotLink::SameVariant => {
                    return Err(Error::InvalidResource(format!(
                        "{:?} slot of {} cannot hold {}: both are {} programs",
                        slot, program, target, variant.name()
                    )));
                }
                SlotLink::Unusable => return Err(Error::MissingReference(target)),
            }
        }

        let released = match self.entries.get_mut(&program) {
            Some(entry) => {
                let previous = entry.resource.get_mut::<ShaderProgram>().and_then(|p| {
                    p.slots[slot.index()] = target;
                    mem::replace(&mut p.bound_slots[slot.index()], target)
                });
                entry.resource.mark_dirty();

                let held = previous.and_then(|previous| {
                    let position = entry.dependencies.iter().position(|hash| *hash == previous)?;
                    Some(entry.dependencies.swap_remove(position))
                });
                entry.dependencies.extend(target);
                held
            }
            None => None,
        };

        if let Some(previous) = released {
            self.release(previous);
        }
        Ok(())
    }

    // ===== TEARDOWN =====

    /// Drop every record, built-ins included
    ///
    /// Waits for the device to go idle first. The default shader slot is
    /// reset so a new bootstrap can set it again.
    pub fn clear(&mut self) {
        match self.lock_device() {
            Ok(device) => {
                if let Err(e) = device.wait_idle() {
                    engine_warn!(SOURCE, "wait_idle failed before teardown: {}", e);
                }
            }
            Err(e) => engine_warn!(SOURCE, "{}", e),
        }

        for entry in self.entries.values_mut() {
            entry.resource.release_gpu();
        }
        self.entries.clear();
        self.loading.clear();
        self.default_shader = None;
        engine_info!(SOURCE, "Resource cache cleared");
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
