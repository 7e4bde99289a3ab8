//! Image ingestion pipeline components.
//!
//! The stages, in the order one upload flows through them:
//! - **sniff**: content-based format detection against the allow-list
//! - **decode**: structural validation, dimension guard, bounded decode
//! - **normalize**: flatten color modes into canonical RGB
//! - **encode**: re-encode as canonical JPEG
//! - **name**: allocate a random, traversal-safe storage identifier
//! - **store**: atomic write under the storage root
//! - **processor**: orchestrates the full pipeline

pub mod decode;
pub mod encode;
pub mod name;
pub mod normalize;
pub mod processor;
pub mod sniff;
pub mod store;

// Re-exports for convenient access
pub use decode::{DecodedImage, Decoder};
pub use encode::{EncodedAsset, Encoder};
pub use name::NameAllocator;
pub use normalize::{NormalizedImage, Normalizer};
pub use processor::Ingestor;
pub use sniff::ImageKind;
pub use store::AssetStore;
