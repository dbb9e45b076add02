//! Unit tests for hash.rs

use super::*;

#[test]
fn test_null_hash() {
    assert!(ResourceHash::NULL.is_null());
    assert!(!ResourceHash::NULL.is_builtin());
    assert_eq!(ResourceHash::default(), ResourceHash::NULL);
    assert_eq!(ResourceHash::NULL.non_null(), None);
}

#[test]
fn test_builtin_range() {
    assert!(ResourceHash(0x10).is_builtin());
    assert!(ResourceHash(0x6f).is_builtin());
    assert!(!ResourceHash(0x70).is_builtin());
    assert!(!ResourceHash(0xdead_beef).is_builtin());
}

#[test]
fn test_file_name_is_sixteen_hex_digits() {
    let hash = ResourceHash(0xABCD);
    assert_eq!(hash.file_stem(), "000000000000abcd");
    assert_eq!(hash.file_name("res"), "000000000000abcd.res");
}

#[test]
fn test_from_file_stem() {
    assert_eq!(ResourceHash::from_file_stem("000000000000abcd"), Some(ResourceHash(0xabcd)));
    assert_eq!(ResourceHash::from_file_stem("ffffffffffffffff"), Some(ResourceHash(u64::MAX)));
    assert_eq!(ResourceHash::from_file_stem("abcd"), None);
    assert_eq!(ResourceHash::from_file_stem("000000000000zzzz"), None);
    assert_eq!(ResourceHash::from_file_stem("000000000000abcd.vert"), None);
}

#[test]
fn test_from_file_stem_only_accepts_canonical_names() {
    assert_eq!(ResourceHash::from_file_stem("FFFFFFFFFFFFFFFF"), None);
    assert_eq!(ResourceHash::from_file_stem("000000000000ABCD"), None);
    assert_eq!(ResourceHash::from_file_stem("+00000000000abcd"), None);
    assert_eq!(ResourceHash::from_file_stem("-00000000000abcd"), None);

    for hash in [ResourceHash(0x70), ResourceHash(0xabcd), ResourceHash(u64::MAX)] {
        assert_eq!(ResourceHash::from_file_stem(&hash.file_stem()), Some(hash));
    }
}

#[test]
fn test_display() {
    assert_eq!(ResourceHash(0x69).to_string(), "0x0000000000000069");
}

#[test]
fn test_optional_hash_encodes_none_as_null() {
    let mut serializer = Serializer::new();
    serializer.write(&None::<ResourceHash>).write(&Some(ResourceHash(0x80)));
    let bytes = serializer.into_bytes();
    assert_eq!(&bytes[..8], &[0u8; 8]);

    let mut deserializer = Deserializer::new(&bytes);
    assert_eq!(deserializer.read::<Option<ResourceHash>>().unwrap(), None);
    assert_eq!(deserializer.read::<Option<ResourceHash>>().unwrap(), Some(ResourceHash(0x80)));
    assert!(deserializer.is_empty());
}
