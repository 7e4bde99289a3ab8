//! Darkroom Core - Embeddable untrusted-image ingestion pipeline.
//!
//! Darkroom takes an arbitrary byte buffer claiming to be an image, proves
//! or disproves that claim, bounds its resource cost, normalizes the pixels
//! to canonical RGB, re-encodes as JPEG, and persists the result atomically
//! under a random, traversal-safe name.
//!
//! # Architecture
//!
//! ```text
//! Bytes → Sniff → Decode (+ dimension guard) → Normalize → Encode → Name → Store
//! ```
//!
//! Stages run strictly in sequence per upload and short-circuit on the
//! first error; nothing is written unless every stage succeeds.
//!
//! # Usage
//!
//! ```rust,ignore
//! use darkroom_core::{Config, Ingestor, RawUpload};
//!
//! #[tokio::main]
//! async fn main() -> darkroom_core::Result<()> {
//!     let config = Config::load()?;
//!     let ingestor = Ingestor::new(&config)?;
//!
//!     let bytes = std::fs::read("./photo.png")?;
//!     let upload = RawUpload::new(bytes, Some("photo.png".to_string()));
//!     let stored = ingestor.ingest(upload).await?;
//!     println!("Stored at {}", stored.access_path);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, DarkroomError, IngestError, IngestResult, Result};
pub use pipeline::{AssetStore, ImageKind, Ingestor};
pub use types::{RawUpload, StorageId, StoredAssetRef};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
