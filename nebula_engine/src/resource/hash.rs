/// Resource identity
///
/// A 64-bit hash is the only stable identifier of a resource. It names the
/// cache file and is the handle stored in every cross-reference.

use std::fmt;

use crate::codec::{BinaryRead, BinaryWrite, Deserializer, Serializer};
use crate::error::Result;

/// Hashes below this value are built-in resources created in code
pub const BUILTIN_HASH_THRESHOLD: u64 = 0x70;

/// Stable 64-bit resource identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceHash(pub u64);

impl ResourceHash {
    /// "No resource"
    pub const NULL: ResourceHash = ResourceHash(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Whether the hash is reserved for a built-in resource
    pub fn is_builtin(self) -> bool {
        !self.is_null() && self.0 < BUILTIN_HASH_THRESHOLD
    }

    /// Cache file stem: 16 lowercase hex digits
    pub fn file_stem(self) -> String {
        format!("{:016x}", self.0)
    }

    /// Cache file name with the given extension
    pub fn file_name(self, extension: &str) -> String {
        format!("{}.{}", self.file_stem(), extension)
    }

    /// Parse a cache file stem back into a hash
    ///
    /// Only the exact form written by `file_stem` is accepted.
    pub fn from_file_stem(stem: &str) -> Option<Self> {
        let canonical = stem.len() == 16
            && stem.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !canonical {
            return None;
        }
        u64::from_str_radix(stem, 16).ok().map(ResourceHash)
    }

    /// `None` for NULL
    pub fn non_null(self) -> Option<Self> {
        if self.is_null() { None } else { Some(self) }
    }
}

impl From<u64> for ResourceHash {
    fn from(value: u64) -> Self {
        ResourceHash(value)
    }
}

impl fmt::Display for ResourceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

impl BinaryWrite for ResourceHash {
    fn write_to(&self, serializer: &mut Serializer) {
        serializer.write(&self.0);
    }
}

impl BinaryRead for ResourceHash {
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
        Ok(ResourceHash(deserializer.read::<u64>()?))
    }
}

// Optional references are stored as NULL on disk
impl BinaryWrite for Option<ResourceHash> {
    fn write_to(&self, serializer: &mut Serializer) {
        self.unwrap_or(ResourceHash::NULL).write_to(serializer);
    }
}

impl BinaryRead for Option<ResourceHash> {
    fn read_from(deserializer: &mut Deserializer<'_>) -> Result<Self> {
        Ok(deserializer.read::<ResourceHash>()?.non_null())
    }
}

#[cfg(test)]
#[path = "hash_tests.rs"]
mod tests;
