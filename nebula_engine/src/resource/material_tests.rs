/// Unit tests for material.rs

use super::*;

#[test]
fn test_material_defaults() {
    let material = Material::new(ResourceHash(0x22), ResourceHash(0x12), ResourceHash::NULL);
    assert_eq!(material.shader_program(), ResourceHash(0x22));
    assert_eq!(material.diffuse(), ResourceHash(0x12));
    assert!(material.normal().is_null());
    assert_eq!(material.base_color, Vec4::ONE);
    assert_eq!(material.roughness, 0.5);
    assert_eq!(material.metallic, 0.0);
}

#[test]
fn test_material_codec_layout() {
    let mut material = Material::new(ResourceHash(1), ResourceHash(2), ResourceHash(3));
    material.roughness = 0.25;
    let mut serializer = Serializer::new();
    serializer.write(&material);
    let bytes = serializer.into_bytes();

    // three hashes, one Vec4, two f32
    assert_eq!(bytes.len(), 3 * 8 + 16 + 4 + 4);
    assert_eq!(&bytes[0..8], &1u64.to_le_bytes());
    assert_eq!(&bytes[40..44], &0.25f32.to_le_bytes());

    let decoded = Deserializer::new(&bytes).read::<Material>().unwrap();
    assert_eq!(decoded, material);
}

#[test]
fn test_material_truncated() {
    let mut serializer = Serializer::new();
    serializer.write(&Material::new(ResourceHash(1), ResourceHash(2), ResourceHash(3)));
    let bytes = serializer.into_bytes();
    assert!(Deserializer::new(&bytes[..30]).read::<Material>().is_err());
}
