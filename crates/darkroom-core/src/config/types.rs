//! Sub-configuration structs with defaults matching the ingestion policy.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory assets are persisted under (flat layout, one file per asset)
    pub root: PathBuf,

    /// Public path prefix an HTTP layer serves assets under
    pub public_base: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("media"),
            public_base: "/media".to_string(),
        }
    }
}

/// Canonical encoding policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// JPEG quality for re-encoding (1-100)
    pub jpeg_quality: u8,

    /// RGB background color alpha channels are composited onto
    pub background: [u8; 3],
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 85,
            background: [255, 255, 255],
        }
    }
}

/// Resource limits to protect against adversarial inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum image dimension (width or height)
    pub max_dimension: u32,

    /// Hard ceiling on decoder allocations in megabytes, enforced even when
    /// the container header understates the decoded size
    pub max_decode_alloc_mb: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_dimension: 4096,
            max_decode_alloc_mb: 512,
        }
    }
}

/// Batch processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of uploads ingested concurrently in batch runs
    pub parallel_workers: usize,

    /// File extensions considered during directory discovery
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 4,
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "gif".to_string(),
                "webp".to_string(),
                "bmp".to_string(),
                "tif".to_string(),
                "tiff".to_string(),
            ],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
