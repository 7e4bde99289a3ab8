//! Boundary types for the Darkroom ingestion pipeline.
//!
//! These are the values that cross the library boundary: the upload coming
//! in and the stored-asset reference going out. Intermediate stage outputs
//! (decoded, normalized, encoded images) live next to their stages in the
//! `pipeline` module.

use serde::{Deserialize, Serialize};

/// An upload as received at the system boundary.
///
/// The original name is advisory: it comes from the caller, is trusted for
/// nothing, and is used only in diagnostics. Storage names are allocated
/// independently of it.
#[derive(Debug, Clone)]
pub struct RawUpload {
    /// Raw file content
    pub bytes: Vec<u8>,

    /// Caller-supplied filename, if any
    pub original_name: Option<String>,
}

impl RawUpload {
    /// Create a new upload from raw bytes and an optional original name.
    pub fn new(bytes: Vec<u8>, original_name: Option<String>) -> Self {
        Self {
            bytes,
            original_name,
        }
    }

    /// Name to show in logs when the caller supplied none.
    pub fn display_name(&self) -> &str {
        self.original_name.as_deref().unwrap_or("unknown")
    }
}

/// Opaque storage identifier for a persisted asset.
///
/// Always allocated from OS randomness, never derived from caller input.
/// The token is lowercase hex plus the canonical extension, so it can be
/// joined onto the storage root without any path inspection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageId(pub(crate) String);

impl StorageId {
    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal output of a successful ingestion.
///
/// This is the record handed to the surrounding CRUD layer: the storage
/// identifier plus the public path an HTTP layer serves the asset under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAssetRef {
    /// Identifier the asset is stored under
    pub identifier: StorageId,

    /// Public access path, e.g. `/media/<identifier>`
    pub access_path: String,
}
