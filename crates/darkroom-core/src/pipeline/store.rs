//! Durable asset persistence with an atomic write-or-nothing discipline.
//!
//! Encoded bytes go to a hidden sibling temp file first (write, flush,
//! fsync), then rename onto the final name — atomic on POSIX filesystems —
//! so a crash or concurrent reader never observes a partial asset. Failed
//! writes may strand temp files; `sweep_temp` is the maintenance routine
//! that clears them.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{IngestError, IngestResult};
use crate::types::{StorageId, StoredAssetRef};

use super::encode::EncodedAsset;
use super::name;

/// Writes encoded assets under the storage root.
#[derive(Clone)]
pub struct AssetStore {
    root: PathBuf,
    public_base: String,
}

impl AssetStore {
    /// Open a store at the given root, creating the directory if needed.
    pub fn open(root: PathBuf, public_base: &str) -> std::io::Result<Self> {
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            public_base: public_base.trim_end_matches('/').to_string(),
        })
    }

    /// The directory assets are written into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Durably write an asset under the given identifier.
    ///
    /// Returns the asset reference only after the rename onto the final
    /// name succeeds. On any I/O error the temp file is removed and nothing
    /// is visible at the final path.
    pub fn persist(&self, asset: &EncodedAsset, id: &StorageId) -> IngestResult<StoredAssetRef> {
        // The allocator can only produce safe names; refuse anything else
        // before touching the filesystem.
        if !name::is_safe_identifier(id.as_str()) {
            tracing::error!("Refusing unsafe storage identifier: {:?}", id.as_str());
            return Err(IngestError::StorageFailure {
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "unsafe storage identifier",
                ),
            });
        }

        let final_path = self.root.join(id.as_str());
        let tmp_path = self
            .root
            .join(format!(".{}.tmp-{}", id.as_str(), name::random_suffix()));

        match write_then_rename(&tmp_path, &final_path, &asset.bytes, &self.root) {
            Ok(()) => Ok(StoredAssetRef {
                identifier: id.clone(),
                access_path: format!("{}/{}", self.public_base, id),
            }),
            Err(e) => {
                let _ = std::fs::remove_file(&tmp_path);
                tracing::error!("Failed to persist asset {}: {}", id, e);
                Err(IngestError::StorageFailure { source: e })
            }
        }
    }

    /// Remove orphaned temp files left behind by failed writes.
    ///
    /// Returns the number of files removed. Safe to run while ingestions
    /// are in flight only during maintenance windows — a temp file being
    /// written right now would be swept too.
    pub fn sweep_temp(&self) -> std::io::Result<usize> {
        let mut removed = 0;
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if file_name.starts_with('.') && file_name.contains(".tmp-") {
                if std::fs::remove_file(entry.path()).is_ok() {
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }
}

/// Write bytes to `tmp_path`, fsync, rename onto `final_path`, then
/// best-effort fsync the directory to persist the rename metadata.
fn write_then_rename(
    tmp_path: &Path,
    final_path: &Path,
    bytes: &[u8],
    dir: &Path,
) -> std::io::Result<()> {
    {
        let mut file = File::create(tmp_path)?;
        file.write_all(bytes)?;
        file.flush()?;
        file.sync_all()?;
    }
    std::fs::rename(tmp_path, final_path)?;
    if let Ok(handle) = File::open(dir) {
        let _ = handle.sync_all();
    }
    Ok(())
}
