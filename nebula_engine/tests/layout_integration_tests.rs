//! Integration tests for uniform layouts and project settings
//!
//! Layouts are computed for the alignment the device reports; settings are
//! persisted next to the resource cache.
//!
//! Run with: cargo test --test layout_integration_tests


use nebula_engine::glam::UVec2;
use nebula_engine::nebula::device::GraphicsDevice;
use nebula_engine::nebula::layout::{pad_to, UniformKind, UniformBlockLayout};
use nebula_engine::nebula::resource::{
    PostProcessSettings, ProjectSettings, ResourceHash, ResourceManager, ResourceManagerConfig,
};
use device_test_utils::{create_manager, temp_cache_dir, EchoCompiler, HeadlessDevice};
use std::sync::{Arc, Mutex};

fn manager_with_alignment(name: &str, alignment: u64) -> ResourceManager {
    let (device, _stats) = HeadlessDevice::new(alignment);
    let device: Arc<Mutex<dyn GraphicsDevice>> = Arc::new(Mutex::new(device));
    ResourceManager::new(
        device,
        Box::new(EchoCompiler),
        ResourceManagerConfig::with_cache_dir(temp_cache_dir(name)),
    )
    .unwrap()
}

// ============================================================================
// LAYOUT TESTS
// ============================================================================

#[test]
fn test_integration_layouts_follow_device_alignment() {
    for alignment in [16u64, 64, 256] {
        let manager = manager_with_alignment(&format!("align_{}", alignment), alignment);

        for kind in UniformKind::ALL {
            let object = manager.uniform_layouts().get(kind);
            let layout = object.block_layout().unwrap();

            assert_eq!(layout.alignment, alignment);
            assert_eq!(layout.vertex_buf_size, kind.vertex_buf_size());
            assert_eq!(layout.fragment_buf_size, kind.fragment_buf_size());
            assert_eq!(layout.fragment_offset % alignment, 0);
            assert_eq!(layout.total_offset % alignment, 0);
            assert!(layout.total_offset >= layout.total_size);
            assert!(layout.total_offset - layout.total_size < alignment);
        }
    }
}

#[test]
fn test_integration_main_layout_offsets() {
    let manager = manager_with_alignment("main_offsets", 256);
    let layout = manager.uniform_layouts().get(UniformKind::Main).block_layout().copied().unwrap();

    // 256 B of matrices, 80 B of fragment vectors
    assert_eq!(
        layout,
        UniformBlockLayout {
            vertex_buf_size: 256,
            fragment_buf_size: 80,
            alignment: 256,
            fragment_offset: 256,
            total_size: 336,
            total_offset: 512,
        }
    );
    assert_eq!(layout.fragment_instance_offset(2), 1280);
    assert_eq!(layout.buffer_size(3), 1536);
}

#[test]
fn test_integration_post_layout_has_no_vertex_block() {
    let manager = manager_with_alignment("post", 64);
    let layout = manager.uniform_layouts().get(UniformKind::Post).block_layout().copied().unwrap();

    assert_eq!(layout.vertex_buf_size, 0);
    assert_eq!(layout.fragment_offset, 0);
    assert_eq!(layout.total_offset, 64);
}

#[test]
fn test_integration_invalid_alignment_fails_construction() {
    let (device, _stats) = HeadlessDevice::new(48);
    let device: Arc<Mutex<dyn GraphicsDevice>> = Arc::new(Mutex::new(device));
    let result = ResourceManager::new(
        device,
        Box::new(EchoCompiler),
        ResourceManagerConfig::with_cache_dir(temp_cache_dir("bad_alignment")),
    );
    assert!(result.is_err());
}

#[test]
fn test_integration_pad_to_properties() {
    for alignment in [1u64, 4, 64, 256] {
        assert_eq!(pad_to(0, alignment).unwrap(), 0);
        for size in [1u64, 3, 63, 64, 65, 300, 1023] {
            let padded = pad_to(size, alignment).unwrap();
            assert_eq!(padded % alignment, 0);
            assert!(padded >= size);
            assert!(padded - size < alignment);
        }
    }
}

// ============================================================================
// PROJECT SETTINGS TESTS
// ============================================================================

#[test]
fn test_integration_project_settings_next_to_cache() {
    let dir = temp_cache_dir("settings");
    let (manager, _stats) = create_manager(&dir);

    assert_eq!(manager.load_project_settings(), ProjectSettings::default());

    let mut settings = ProjectSettings {
        resolution: UVec2::new(1920, 1080),
        full_screen: true,
        default_scene: ResourceHash(0x69),
        post_process: Vec::new(),
    };
    manager.save_project_settings(&settings).unwrap();
    assert!(dir.join("project.settings").exists());
    assert_eq!(manager.load_project_settings(), settings);

    let post = PostProcessSettings {
        bloom_enabled: true,
        vignette: 0.4,
        ..PostProcessSettings::default()
    };
    settings.set_post_process_settings(&post);
    manager.save_project_settings(&settings).unwrap();

    let reloaded = manager.load_project_settings();
    assert_eq!(reloaded.post_process_settings().unwrap(), post);
}

#[test]
fn test_integration_settings_file_is_not_a_resource() {
    let dir = temp_cache_dir("settings_scan");
    let (mut manager, _stats) = create_manager(&dir);
    manager.save_project_settings(&ProjectSettings::default()).unwrap();

    assert_eq!(manager.load_resources_already_cached().unwrap(), 0);
}
