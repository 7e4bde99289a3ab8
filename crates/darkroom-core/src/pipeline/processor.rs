//! Pipeline orchestration - wires the ingestion stages together.

use std::time::Instant;

use crate::config::Config;
use crate::error::{IngestError, IngestResult, Result};
use crate::types::{RawUpload, StoredAssetRef};

use super::decode::Decoder;
use super::encode::Encoder;
use super::name::NameAllocator;
use super::normalize::Normalizer;
use super::store::AssetStore;

/// The ingestion pipeline entry point.
///
/// Holds configuration and nothing else: every ingestion is independent, so
/// one `Ingestor` serves any number of concurrent callers.
pub struct Ingestor {
    decoder: Decoder,
    normalizer: Normalizer,
    encoder: Encoder,
    allocator: NameAllocator,
    store: AssetStore,
}

impl Ingestor {
    /// Create an ingestor from configuration, creating the storage root if
    /// it does not exist yet.
    pub fn new(config: &Config) -> Result<Self> {
        let store = AssetStore::open(config.storage_root(), &config.storage.public_base)?;
        tracing::debug!("Storage root ready: {:?}", store.root());
        Ok(Self {
            decoder: Decoder::new(config.limits.clone()),
            normalizer: Normalizer::new(&config.image),
            encoder: Encoder::new(&config.image),
            allocator: NameAllocator,
            store,
        })
    }

    /// The store backing this ingestor (for maintenance routines).
    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    /// Run one upload through the full pipeline.
    ///
    /// Stages run strictly in sequence and short-circuit on the first
    /// error. Decode, normalize, and encode are CPU-bound and run on the
    /// blocking pool, as does the final disk write — nothing here blocks
    /// the async executor. Errors before the persist stage leave no side
    /// effects at all.
    pub async fn ingest(&self, upload: RawUpload) -> IngestResult<StoredAssetRef> {
        let start = Instant::now();
        let original_name = upload.display_name().to_string();
        let upload_size = upload.bytes.len();
        tracing::debug!("Ingesting: {} ({} bytes)", original_name, upload_size);

        let decoder = self.decoder.clone();
        let normalizer = self.normalizer.clone();
        let encoder = self.encoder.clone();
        let bytes = upload.bytes;

        let (encoded, kind, width, height) = tokio::task::spawn_blocking(move || {
            let stage_start = Instant::now();
            let decoded = decoder.decode(&bytes)?;
            tracing::trace!("  Decode: {:?}", stage_start.elapsed());

            let kind = decoded.kind;
            let (width, height) = (decoded.width, decoded.height);

            let stage_start = Instant::now();
            let normalized = normalizer.normalize(decoded)?;
            tracing::trace!("  Normalize: {:?}", stage_start.elapsed());

            let stage_start = Instant::now();
            let encoded = encoder.encode(&normalized)?;
            tracing::trace!("  Encode: {:?}", stage_start.elapsed());

            Ok::<_, IngestError>((encoded, kind, width, height))
        })
        .await
        .map_err(|e| IngestError::EncodingFailure {
            detail: format!("worker task failed: {e}"),
        })??;

        let encoded_size = encoded.len();
        let id = self.allocator.allocate();

        // The write runs to completion on the blocking pool even if the
        // caller stops awaiting, so an abandoned request cannot leave a
        // half-written file.
        let store = self.store.clone();
        let write_id = id.clone();
        let stored = tokio::task::spawn_blocking(move || store.persist(&encoded, &write_id))
            .await
            .map_err(|e| IngestError::StorageFailure {
                source: std::io::Error::other(format!("worker task failed: {e}")),
            })??;

        tracing::info!(
            "Stored {} ({}x{} {}, {} -> {} bytes, original: {}) in {:?}",
            stored.identifier,
            width,
            height,
            kind.as_str(),
            upload_size,
            encoded_size,
            original_name,
            start.elapsed()
        );
        Ok(stored)
    }
}
