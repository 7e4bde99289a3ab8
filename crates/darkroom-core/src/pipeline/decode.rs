//! Structural decoding of untrusted bytes with dimension and memory guards.
//!
//! Order of operations matters here: the format is sniffed from content, the
//! dimensions are probed from the container header alone, and only then is
//! the full frame decoded — under hard decoder limits that hold even when
//! the header lies about the decoded size.

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageReader, Limits};

use crate::config::LimitsConfig;
use crate::error::{IngestError, IngestResult};

use super::sniff::{self, ImageKind};

/// Decodes and validates untrusted image bytes.
#[derive(Clone)]
pub struct Decoder {
    limits: LimitsConfig,
}

/// Result of decoding an upload.
#[derive(Debug)]
pub struct DecodedImage {
    /// The decoded pixel data
    pub image: DynamicImage,
    /// Container format the bytes were sniffed as
    pub kind: ImageKind,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl Decoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Decode untrusted bytes into pixels, or reject them.
    ///
    /// Fails with `InvalidImage` for anything that is not a structurally
    /// complete image in an allowed format, and with `OversizedImage` when
    /// either axis exceeds the configured ceiling — the dimension check runs
    /// against the container header, before any full-frame decode.
    pub fn decode(&self, bytes: &[u8]) -> IngestResult<DecodedImage> {
        let kind = sniff::detect(bytes).ok_or_else(|| IngestError::InvalidImage {
            detail: "no allowed image signature".to_string(),
        })?;

        // Header-only probe: rejects dimension bombs without materializing
        // the pixel buffer.
        let (width, height) = self.peek_dimensions(bytes, kind)?;
        self.check_dimensions(width, height)?;

        let mut reader = ImageReader::with_format(Cursor::new(bytes), kind.format());
        reader.limits(self.decode_limits());
        let image = reader
            .decode()
            .map_err(|e| self.map_decode_error(e, width, height))?;

        // The header is untrusted too: re-check against the actual buffer.
        let (width, height) = image.dimensions();
        self.check_dimensions(width, height)?;

        Ok(DecodedImage {
            image,
            kind,
            width,
            height,
        })
    }

    /// Read width and height from the container header without decoding
    /// pixel data.
    fn peek_dimensions(&self, bytes: &[u8], kind: ImageKind) -> IngestResult<(u32, u32)> {
        ImageReader::with_format(Cursor::new(bytes), kind.format())
            .into_dimensions()
            .map_err(|e| IngestError::InvalidImage {
                detail: format!("cannot read {} header: {}", kind.as_str(), e),
            })
    }

    fn check_dimensions(&self, width: u32, height: u32) -> IngestResult<()> {
        let max = self.limits.max_dimension;
        if width > max || height > max {
            return Err(IngestError::OversizedImage {
                width,
                height,
                max_dimension: max,
            });
        }
        Ok(())
    }

    /// Hard decoder limits, independent of the header probe.
    fn decode_limits(&self) -> Limits {
        let mut limits = Limits::no_limits();
        limits.max_image_width = Some(self.limits.max_dimension);
        limits.max_image_height = Some(self.limits.max_dimension);
        limits.max_alloc = Some(self.limits.max_decode_alloc_mb * 1024 * 1024);
        limits
    }

    fn map_decode_error(&self, err: image::ImageError, width: u32, height: u32) -> IngestError {
        match err {
            // A limit violation during decode means the actual frame is
            // bigger than the header admitted
            image::ImageError::Limits(e) => {
                tracing::warn!("Decoder limit hit ({}x{} declared): {}", width, height, e);
                IngestError::OversizedImage {
                    width,
                    height,
                    max_dimension: self.limits.max_dimension,
                }
            }
            other => IngestError::InvalidImage {
                detail: other.to_string(),
            },
        }
    }
}
