/// Unit tests for editor.rs

use super::*;
use std::fs;
use std::sync::{Arc, Mutex};
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::{GraphicsDevice, Pipeline, ShaderStage};
use crate::resource::{BuiltinResource, ResourceData, ResourceManagerConfig, Shader};
use crate::shader_compiler::ShaderCompiler;

struct EchoCompiler;

impl ShaderCompiler for EchoCompiler {
    fn compile(&self, source: &Path, _destination: &Path, _stage: ShaderStage) -> Result<Vec<u8>> {
        Ok(fs::read(source)?)
    }
}

fn manager(name: &str) -> (ResourceManager, PathBuf) {
    let dir = std::env::temp_dir().join(format!("nebula_editor_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let device: Arc<Mutex<dyn GraphicsDevice>> = Arc::new(Mutex::new(MockGraphicsDevice::new()));
    let mut manager = ResourceManager::new(
        device,
        Box::new(EchoCompiler),
        ResourceManagerConfig::with_cache_dir(&dir),
    )
    .unwrap();
    manager.load_resources_already_cached().unwrap();
    (manager, dir)
}

/// Shaders 0x100/0x101 and a Default program at 0x200
fn with_program(manager: &mut ResourceManager) {
    manager
        .insert(ResourceHash(0x100), "vs", ResourceData::Shader(Shader::from_bytecode(ShaderStage::Vertex, "", vec![1; 4])))
        .unwrap();
    manager
        .insert(ResourceHash(0x101), "fs", ResourceData::Shader(Shader::from_bytecode(ShaderStage::Fragment, "", vec![2; 4])))
        .unwrap();
    manager
        .insert(
            ResourceHash(0x200),
            "lit",
            ResourceData::ShaderProgram(ShaderProgram::new(ResourceHash(0x100), ResourceHash(0x101), None, ShaderVariant::Default)),
        )
        .unwrap();
}

#[test]
fn test_editor_unknown_hash() {
    let (mut manager, _) = manager("unknown");
    assert!(manager.editor(ResourceHash(0x4242)).is_none());
}

#[test]
fn test_editor_reads_fields() {
    let (mut manager, _) = manager("read");
    with_program(&mut manager);

    let editor = manager.editor(ResourceHash(0x200)).unwrap();
    assert_eq!(editor.name(), "lit");
    assert_eq!(editor.path(), Path::new(""));
    assert_eq!(editor.variant(), Some(ShaderVariant::Default));
    assert!(editor.can_be_edited());
}

#[test]
fn test_set_name_and_path_mark_unsaved() {
    let (mut manager, _) = manager("rename");
    with_program(&mut manager);
    manager.save_asset(ResourceHash(0x200)).unwrap();

    let mut editor = manager.editor(ResourceHash(0x200)).unwrap();
    assert!(editor.is_saved());
    editor.set_name("unlit").unwrap();
    editor.set_path("shaders/unlit.program").unwrap();

    assert_eq!(editor.name(), "unlit");
    assert_eq!(editor.path(), Path::new("shaders/unlit.program"));
    assert!(!editor.is_saved());
}

#[test]
fn test_builtin_rejects_edits() {
    let (mut manager, _) = manager("builtin");
    let mut editor = manager.editor(BuiltinResource::DefaultShaderProgram.hash()).unwrap();

    assert!(!editor.can_be_edited());
    assert!(matches!(editor.set_name("mine"), Err(Error::InvalidResource(_))));
    assert!(editor.set_path("x").is_err());
    assert!(editor.set_variant(ShaderVariant::Shadow).is_err());
    assert!(editor.save().is_err());
    assert_eq!(editor.name(), BuiltinResource::DefaultShaderProgram.name());
}

#[test]
fn test_variant_options() {
    let (mut manager, _) = manager("options");
    with_program(&mut manager);
    let editor = manager.editor(ResourceHash(0x200)).unwrap();

    let options = editor.variant_options();
    assert_eq!(options.len(), ShaderVariant::ALL.len());
    assert_eq!(options[0], (ShaderVariant::Default, "Default"));
    assert_eq!(options[7], (ShaderVariant::PostProcess, "Post Process"));
}

#[test]
fn test_set_variant_rebuilds_program() {
    let (mut manager, _) = manager("set_variant");
    with_program(&mut manager);

    let mut editor = manager.editor(ResourceHash(0x200)).unwrap();
    editor.set_variant(ShaderVariant::Shadow).unwrap();
    assert_eq!(editor.variant(), Some(ShaderVariant::Shadow));
    assert!(!editor.is_saved());

    let program = manager.resource(ResourceHash(0x200)).unwrap().get::<ShaderProgram>().unwrap();
    assert!(!program.pipeline().unwrap().state().color_blend.color_write_enable);
}

#[test]
fn test_set_variant_on_non_program() {
    let (mut manager, _) = manager("non_program");
    with_program(&mut manager);

    let mut editor = manager.editor(ResourceHash(0x100)).unwrap();
    assert_eq!(editor.variant(), None);
    assert!(matches!(editor.set_variant(ShaderVariant::Cube), Err(Error::InvalidResource(_))));
}

#[test]
fn test_set_variant_slot_through_editor() {
    let (mut manager, _) = manager("slot");
    with_program(&mut manager);
    manager
        .insert(
            ResourceHash(0x201),
            "lit shadow",
            ResourceData::ShaderProgram(ShaderProgram::new(ResourceHash(0x100), ResourceHash(0x101), None, ShaderVariant::Shadow)),
        )
        .unwrap();

    let mut editor = manager.editor(ResourceHash(0x200)).unwrap();
    editor.set_variant_slot(VariantSlot::Shadow, Some(ResourceHash(0x201))).unwrap();
    assert_eq!(editor.variant_slot(VariantSlot::Shadow), Some(ResourceHash(0x201)));
    assert_eq!(editor.variant_slot(VariantSlot::Cube), None);

    assert_eq!(
        manager.resolve_shader(ResourceHash(0x200), ShaderVariant::Shadow).unwrap(),
        ResourceHash(0x201)
    );
}

#[test]
fn test_save_writes_cache_file() {
    let (mut manager, dir) = manager("save");
    with_program(&mut manager);

    let mut editor = manager.editor(ResourceHash(0x200)).unwrap();
    editor.set_name("saved").unwrap();
    editor.save().unwrap();
    assert!(editor.is_saved());

    let bytes = fs::read(dir.join("0000000000000200.res")).unwrap();
    let resource = Resource::from_bytes(ResourceHash(0x200), &bytes).unwrap();
    assert_eq!(resource.name(), "saved");
}
