//! Error types for the Darkroom ingestion pipeline.
//!
//! `IngestError` is the caller-visible taxonomy: each variant maps to a
//! stable machine code and a client/server classification. Display messages
//! are safe to hand back to an API caller — decoder internals and filesystem
//! paths stay in non-Display fields and source chains, surfaced via logging
//! only.

use thiserror::Error;

/// Top-level error type for Darkroom operations.
#[derive(Error, Debug)]
pub enum DarkroomError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Ingestion pipeline errors
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Ingestion failures, one variant per way the pipeline can reject or fail
/// an upload.
///
/// The Display string is the caller-facing message. Variants carry extra
/// context for diagnostics; that context is deliberately excluded from the
/// message so a crafted upload can never reflect decoder internals back out.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Input is not a structurally valid image in any allowed format
    #[error("file must be a valid image")]
    InvalidImage {
        /// Decoder-level reason, for logs only
        detail: String,
    },

    /// Decoded or declared dimensions exceed the configured ceiling
    #[error("image dimensions too large, maximum allowed is {max_dimension}x{max_dimension}")]
    OversizedImage {
        width: u32,
        height: u32,
        max_dimension: u32,
    },

    /// Decoded color mode fell outside the closed set the normalizer
    /// handles. Unreachable while the decode allow-list and the normalizer
    /// agree; reported as an internal defect, not a user input error.
    #[error("internal error while processing image")]
    UnsupportedColorMode {
        /// Debug rendering of the unexpected color type, for logs only
        mode: String,
    },

    /// Canonical re-encoding failed (encoder resource exhaustion)
    #[error("failed to encode image")]
    EncodingFailure {
        /// Encoder-level reason, for logs only
        detail: String,
    },

    /// Durable write failed; nothing partial is visible at the final path
    #[error("could not store file")]
    StorageFailure {
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// Stable machine-readable code for API error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            IngestError::InvalidImage { .. } => "invalid_image",
            IngestError::OversizedImage { .. } => "oversized_image",
            IngestError::UnsupportedColorMode { .. } => "unsupported_color_mode",
            IngestError::EncodingFailure { .. } => "encoding_failure",
            IngestError::StorageFailure { .. } => "storage_failure",
        }
    }

    /// True when the fault lies with the uploaded bytes (HTTP 4xx class).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            IngestError::InvalidImage { .. } | IngestError::OversizedImage { .. }
        )
    }

    /// True when resubmitting the same bytes may succeed later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            IngestError::EncodingFailure { .. } | IngestError::StorageFailure { .. }
        )
    }
}

/// Convenience type alias for Darkroom results.
pub type Result<T> = std::result::Result<T, DarkroomError>;

/// Convenience type alias for ingestion results.
pub type IngestResult<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        let e = IngestError::InvalidImage {
            detail: "bad header".into(),
        };
        assert_eq!(e.code(), "invalid_image");

        let e = IngestError::OversizedImage {
            width: 5000,
            height: 5000,
            max_dimension: 4096,
        };
        assert_eq!(e.code(), "oversized_image");

        let e = IngestError::StorageFailure {
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(e.code(), "storage_failure");
    }

    #[test]
    fn test_client_server_split() {
        assert!(IngestError::InvalidImage {
            detail: String::new()
        }
        .is_client_error());
        assert!(IngestError::OversizedImage {
            width: 1,
            height: 1,
            max_dimension: 1
        }
        .is_client_error());
        assert!(!IngestError::StorageFailure {
            source: std::io::Error::other("x")
        }
        .is_client_error());
        assert!(!IngestError::EncodingFailure {
            detail: String::new()
        }
        .is_client_error());
    }

    #[test]
    fn test_retryable() {
        assert!(IngestError::StorageFailure {
            source: std::io::Error::other("x")
        }
        .is_retryable());
        assert!(!IngestError::InvalidImage {
            detail: String::new()
        }
        .is_retryable());
    }

    #[test]
    fn test_messages_do_not_leak_detail() {
        let e = IngestError::InvalidImage {
            detail: "zune-jpeg: invalid SOS marker at offset 42".into(),
        };
        let msg = e.to_string();
        assert!(!msg.contains("zune"));
        assert!(!msg.contains("offset"));

        let e = IngestError::StorageFailure {
            source: std::io::Error::other("/var/lib/media/.a.tmp: permission denied"),
        };
        assert!(!e.to_string().contains("/var"));
    }
}
