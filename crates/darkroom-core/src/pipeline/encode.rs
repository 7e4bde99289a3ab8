//! Canonical JPEG encoding of normalized pixels.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use crate::config::ImageConfig;
use crate::error::{IngestError, IngestResult};

use super::normalize::NormalizedImage;

/// Re-encodes normalized pixels into the canonical on-disk format.
#[derive(Clone)]
pub struct Encoder {
    quality: u8,
}

/// An immutable byte sequence in the canonical output format.
pub struct EncodedAsset {
    /// Encoded JPEG bytes
    pub bytes: Vec<u8>,
}

impl EncodedAsset {
    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the asset holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Encoder {
    /// Create a new encoder at the configured quality.
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            quality: config.jpeg_quality,
        }
    }

    /// Encode canonical RGB pixels as JPEG.
    ///
    /// Deterministic: the encoder embeds no timestamps or random state, so
    /// identical pixels and quality always produce byte-identical output.
    /// Failure here means encoder-internal resource exhaustion, never a
    /// property of the original upload.
    pub fn encode(&self, image: &NormalizedImage) -> IngestResult<EncodedAsset> {
        let mut bytes = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, self.quality);
        encoder
            .encode(
                image.pixels.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| IngestError::EncodingFailure {
                detail: e.to_string(),
            })?;
        Ok(EncodedAsset { bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, RgbImage};

    fn encoder() -> Encoder {
        Encoder::new(&ImageConfig::default())
    }

    fn gradient(width: u32, height: u32) -> NormalizedImage {
        let pixels = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
        });
        NormalizedImage { pixels }
    }

    #[test]
    fn test_output_is_jpeg() {
        let asset = encoder().encode(&gradient(32, 32)).unwrap();
        // JPEG SOI marker
        assert_eq!(&asset.bytes[0..2], &[0xFF, 0xD8]);
        assert!(!asset.is_empty());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let image = gradient(48, 48);
        let first = encoder().encode(&image).unwrap();
        let second = encoder().encode(&image).unwrap();
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn test_roundtrip_preserves_dimensions() {
        let asset = encoder().encode(&gradient(40, 24)).unwrap();
        let back = image::load_from_memory(&asset.bytes).unwrap();
        assert_eq!((back.width(), back.height()), (40, 24));
    }

    #[test]
    fn test_uniform_white_survives_lossy_encode() {
        let white = NormalizedImage {
            pixels: RgbImage::from_pixel(10, 10, image::Rgb([255, 255, 255])),
        };
        let asset = encoder().encode(&white).unwrap();
        let back = image::load_from_memory(&asset.bytes).unwrap().into_rgb8();
        assert_eq!(back.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(back.get_pixel(9, 9).0, [255, 255, 255]);
    }

    #[test]
    fn test_quality_changes_output() {
        let image = gradient(64, 64);
        let high = encoder().encode(&image).unwrap();
        let low = Encoder::new(&ImageConfig {
            jpeg_quality: 10,
            ..ImageConfig::default()
        })
        .encode(&image)
        .unwrap();
        assert_ne!(high.bytes, low.bytes);
    }
}
