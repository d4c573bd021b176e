//! Namespace identifiers derived from dot-separated names.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::fmt;

/// Maximum namespace nesting depth (`root.child.grandchild`).
pub const NAMESPACE_MAX_DEPTH: usize = 3;

/// An opaque 64-bit namespace identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NamespaceId(u64);

impl NamespaceId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Derive the id of a (possibly nested) namespace from its full name.
    ///
    /// `"a.b.c"` yields the id of `c` under `b` under root `a`.
    pub fn from_name(name: &str) -> Result<Self, ModelError> {
        let path = generate_namespace_path(name)?;
        // generate_namespace_path rejects empty names, so the path is
        // non-empty here.
        Ok(*path.last().expect("namespace path is never empty"))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({:016x})", self.0)
    }
}

/// Derive the id chain for a dot-separated namespace name, root first.
///
/// Each level computes `SHA3-256(u64_le(parent) || ascii(part))`, takes the
/// first two little-endian u32 words of the digest, forces bit 31 of the
/// second word to 1, and combines them into the next parent id. The root
/// parent is 0. This must match the network's canonical algorithm
/// bit-for-bit.
pub fn generate_namespace_path(name: &str) -> Result<Vec<NamespaceId>, ModelError> {
    let parts: Vec<&str> = name.split('.').collect();
    if name.is_empty() || parts.is_empty() {
        return Err(ModelError::InvalidNamespaceName(name.to_string()));
    }
    if parts.len() > NAMESPACE_MAX_DEPTH {
        return Err(ModelError::NamespaceDepthExceeded(parts.len()));
    }

    let mut path = Vec::with_capacity(parts.len());
    let mut parent: u64 = 0;
    for part in parts {
        if !is_valid_part(part) {
            return Err(ModelError::InvalidNamespaceName(part.to_string()));
        }
        parent = derive_level(parent, part);
        path.push(NamespaceId(parent));
    }
    Ok(path)
}

/// One derivation step: parent id + name part -> child id.
fn derive_level(parent: u64, part: &str) -> u64 {
    let mut hasher = Sha3_256::new();
    hasher.update(parent.to_le_bytes());
    hasher.update(part.as_bytes());
    let digest = hasher.finalize();

    let low = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let high = u32::from_le_bytes([digest[4], digest[5], digest[6], digest[7]]) | 0x8000_0000;
    (high as u64) << 32 | low as u64
}

/// Name parts match `[a-z0-9][a-z0-9_-]*`.
fn is_valid_part(part: &str) -> bool {
    let mut chars = part.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_lowercase() && !first.is_ascii_digit() {
        return false;
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
