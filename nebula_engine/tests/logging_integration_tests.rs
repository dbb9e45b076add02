//! Integration tests for the logging channel as driven by the resource cache
//!
//! The editor installs an EditorLog, runs cache operations and polls the
//! warning/error flags once per frame. No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests


use nebula_engine::nebula::Engine;
use nebula_engine::nebula::device::{SamplerDesc, ShaderCompiler, ShaderStage};
use nebula_engine::nebula::log::{EditorLog, Logger, LogEntry, LogSeverity};
use nebula_engine::nebula::resource::{
    BuiltinResource, Material, Resource, ResourceData, ResourceHash, Shader, TextureSampler,
};
use nebula_engine::nebula::{Error, Result};
use device_test_utils::{create_manager, create_manager_with_compiler, temp_cache_dir};
use serial_test::serial;
use std::path::Path;

const MANAGER: &str = "nebula::ResourceManager";

// ============================================================================
// HELPERS
// ============================================================================

/// Drops everything the editor log forwards
struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _entry: &LogEntry) {}
}

/// Fails like glslc on a typo
struct DiagnosticCompiler;

impl ShaderCompiler for DiagnosticCompiler {
    fn compile(&self, source: &Path, _destination: &Path, _stage: ShaderStage) -> Result<Vec<u8>> {
        Err(Error::ShaderCompilation {
            path: source.to_path_buf(),
            log: vec![
                format!("{}:4: error: 'gl_Positon' : undeclared identifier", source.display()),
                format!("{}:4: error: '' : compilation terminated", source.display()),
                "2 errors generated.".to_string(),
            ],
        })
    }
}

fn install_editor_log() -> EditorLog {
    let editor_log = EditorLog::with_inner(NullLogger, 256);
    Engine::set_logger(editor_log.clone());
    editor_log
}

fn manager_entries(editor_log: &EditorLog, severity: LogSeverity) -> Vec<LogEntry> {
    editor_log
        .entries()
        .into_iter()
        .filter(|e| e.source == MANAGER && e.severity == severity)
        .collect()
}

fn write_record(dir: &Path, hash: ResourceHash, data: ResourceData) {
    let bytes = Resource::new(hash, "record", "", Some(data)).to_bytes().unwrap();
    std::fs::write(dir.join(hash.file_name("res")), bytes).unwrap();
}

// ============================================================================
// CACHE LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_clean_bootstrap_raises_no_flags() {
    let dir = temp_cache_dir("log_clean");
    let (mut manager, _stats) = create_manager(&dir);

    let editor_log = install_editor_log();
    manager.load_resources_already_cached().unwrap();
    Engine::reset_logger();

    assert!(!editor_log.has_warnings());
    assert!(!editor_log.has_errors());
    let infos = manager_entries(&editor_log, LogSeverity::Info);
    assert!(infos.iter().any(|e| e.message.starts_with("Cache warmed")));
}

#[test]
#[serial]
fn test_integration_corrupt_cache_file_warns_once() {
    let dir = temp_cache_dir("log_corrupt");
    std::fs::write(dir.join("00000000000000a0.res"), b"").unwrap();
    let (mut manager, _stats) = create_manager(&dir);

    let editor_log = install_editor_log();
    let loaded = manager.load_resources_already_cached().unwrap();
    Engine::reset_logger();

    assert_eq!(loaded, 0);
    assert!(manager.resource(BuiltinResource::DefaultMaterial.hash()).is_some());
    assert_eq!(manager.resource(ResourceHash(0xa0)).map(|r| r.is_loaded()), Some(false));

    let hash = ResourceHash(0xa0).to_string();
    let warnings: Vec<LogEntry> = manager_entries(&editor_log, LogSeverity::Warn)
        .into_iter()
        .filter(|e| e.message.contains(&hash))
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(!editor_log.has_errors());
}

#[test]
#[serial]
fn test_integration_compiler_diagnostics_logged_line_by_line() {
    let dir = temp_cache_dir("log_compile");
    let hash = ResourceHash(0xb0);
    write_record(&dir, hash, ResourceData::Shader(Shader::new(ShaderStage::Vertex, "void main() { gl_Positon = vec4(0.0); }")));
    let (mut manager, _stats) = create_manager_with_compiler(&dir, Box::new(DiagnosticCompiler));

    let editor_log = install_editor_log();
    let loaded = manager.load_resources_already_cached().unwrap();
    Engine::reset_logger();

    assert_eq!(loaded, 0);
    assert_eq!(manager.resource(hash).map(|r| r.is_loaded()), Some(false));
    assert!(editor_log.has_errors());

    let errors = manager_entries(&editor_log, LogSeverity::Error);
    assert_eq!(errors.len(), 4);
    assert!(errors[0].message.contains(&hash.to_string()));
    assert!(errors[1].message.trim().ends_with("'gl_Positon' : undeclared identifier"));
    assert!(errors[2].message.trim().ends_with("compilation terminated"));
    assert_eq!(errors[3].message.trim(), "2 errors generated.");
    assert!(errors.iter().all(|e| e.line.is_some()));

    let failed: Vec<LogEntry> = manager_entries(&editor_log, LogSeverity::Warn)
        .into_iter()
        .filter(|e| e.message.contains(&hash.to_string()))
        .collect();
    assert_eq!(failed.len(), 1);
}

#[test]
#[serial]
fn test_integration_fallback_warns_until_cleared() {
    let dir = temp_cache_dir("log_fallback");
    let material = ResourceHash(0xb1);
    let missing = ResourceHash(0xbad);
    write_record(&dir, material, ResourceData::Material(Material::new(
        BuiltinResource::DefaultShaderProgram.hash(),
        missing,
        ResourceHash::NULL,
    )));
    let (mut manager, _stats) = create_manager(&dir);

    let editor_log = install_editor_log();
    manager.load_resources_already_cached().unwrap();

    assert!(editor_log.has_warnings());
    assert!(!editor_log.has_errors());
    let warnings = manager_entries(&editor_log, LogSeverity::Warn);
    assert!(warnings.iter().any(|e| {
        e.message.contains(&missing.to_string())
            && e.message.contains(&BuiltinResource::DebugTexture.hash().to_string())
    }));

    // next frame: the live record is reused without new warnings
    editor_log.clear();
    assert!(manager.load(material).unwrap().is_loaded());
    Engine::reset_logger();

    assert!(!editor_log.has_warnings());
    assert!(manager_entries(&editor_log, LogSeverity::Warn).is_empty());
}

#[test]
#[serial]
fn test_integration_type_mismatch_is_an_error() {
    let dir = temp_cache_dir("log_mismatch");
    let hash = ResourceHash(0xb2);
    write_record(&dir, hash, ResourceData::Sampler(TextureSampler::new(SamplerDesc::default())));
    let (mut manager, _stats) = create_manager(&dir);
    manager.load_resources_already_cached().unwrap();

    let editor_log = install_editor_log();
    assert!(manager.get::<Material>(hash).is_none());
    Engine::reset_logger();

    assert!(editor_log.has_errors());
    let errors = manager_entries(&editor_log, LogSeverity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("not a Material"));
    // the scan's reference is still held
    assert_eq!(manager.ref_count(hash), 1);
}

#[test]
#[serial]
fn test_integration_second_default_shader_warns() {
    let dir = temp_cache_dir("log_default_shader");
    let (mut manager, _stats) = create_manager(&dir);
    manager.load_resources_already_cached().unwrap();

    let editor_log = install_editor_log();
    assert!(!manager.set_default_shader(ResourceHash(0x300)));
    Engine::reset_logger();

    assert_eq!(manager.default_shader(), Some(BuiltinResource::DefaultShaderProgram.hash()));
    assert_eq!(editor_log.count(LogSeverity::Warn), 1);
    assert!(!editor_log.has_errors());
}
