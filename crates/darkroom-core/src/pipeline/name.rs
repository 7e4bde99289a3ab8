//! Storage identifier allocation.
//!
//! Identifiers come from OS randomness alone — 128 bits per name — so
//! collisions are negligible and nothing the caller sends can influence
//! where an asset lands. The token alphabet is a strict subset of
//! `[a-zA-Z0-9_\-.]` with no way to spell `..` or a path separator.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::types::StorageId;

/// Random bytes per identifier (128 bits of entropy).
const TOKEN_BYTES: usize = 16;

/// Extension of the canonical output format.
const EXTENSION: &str = "jpg";

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Allocates collision-resistant, traversal-safe storage identifiers.
#[derive(Clone, Copy)]
pub struct NameAllocator;

impl NameAllocator {
    /// Allocate a fresh identifier. Infallible.
    pub fn allocate(&self) -> StorageId {
        let mut raw = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut raw);

        let mut token = String::with_capacity(TOKEN_BYTES * 2 + EXTENSION.len() + 1);
        push_hex(&mut token, &raw);
        token.push('.');
        token.push_str(EXTENSION);
        StorageId(token)
    }
}

/// Short random suffix for temp-file names in the persistence sink.
pub(crate) fn random_suffix() -> String {
    let mut raw = [0u8; 4];
    OsRng.fill_bytes(&mut raw);
    let mut s = String::with_capacity(8);
    push_hex(&mut s, &raw);
    s
}

fn push_hex(out: &mut String, bytes: &[u8]) {
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
}

/// Check a name against the safe-identifier pattern.
///
/// Allocated identifiers always pass; this exists so the persistence sink
/// can refuse anything else regardless of bugs elsewhere in the pipeline.
pub fn is_safe_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
}
