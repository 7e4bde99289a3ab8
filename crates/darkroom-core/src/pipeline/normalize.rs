//! Color normalization to the canonical 3-channel mode.
//!
//! Every accepted image leaves this stage as 8-bit RGB. Alpha channels are
//! composited against the configured background — dropping alpha without
//! compositing turns transparent regions into garbage, so that path does not
//! exist here. Palette inputs arrive already expanded by the decoders.

use image::{ColorType, RgbImage, RgbaImage};

use crate::config::ImageConfig;
use crate::error::{IngestError, IngestResult};

use super::decode::DecodedImage;

/// Flattens decoded images into canonical RGB.
#[derive(Clone)]
pub struct Normalizer {
    background: [u8; 3],
}

/// A pixel buffer in the canonical color mode.
///
/// Invariant: exactly width x height x 3 bytes, no alpha channel.
pub struct NormalizedImage {
    /// Canonical 8-bit RGB pixels
    pub pixels: RgbImage,
}

impl NormalizedImage {
    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

impl Normalizer {
    /// Create a new normalizer with the configured background color.
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            background: config.background,
        }
    }

    /// Flatten any supported color mode into canonical RGB.
    ///
    /// `UnsupportedColorMode` is unreachable while the decode allow-list and
    /// this match agree; it exists so a future decoder addition cannot
    /// silently produce wrong pixels.
    pub fn normalize(&self, decoded: DecodedImage) -> IngestResult<NormalizedImage> {
        let color = decoded.image.color();
        let pixels = match color {
            // Opaque modes expand losslessly (16-bit depth narrows to 8)
            ColorType::L8 | ColorType::Rgb8 | ColorType::L16 | ColorType::Rgb16 => {
                decoded.image.into_rgb8()
            }
            // Alpha modes are composited onto the background
            ColorType::La8 | ColorType::Rgba8 | ColorType::La16 | ColorType::Rgba16 => {
                self.composite(decoded.image.into_rgba8())
            }
            other => {
                tracing::error!(
                    "Color mode allow-list inconsistency: decoder produced {:?}",
                    other
                );
                return Err(IngestError::UnsupportedColorMode {
                    mode: format!("{other:?}"),
                });
            }
        };
        Ok(NormalizedImage { pixels })
    }

    /// Alpha-composite over the background color with round-to-nearest.
    fn composite(&self, rgba: RgbaImage) -> RgbImage {
        let (width, height) = rgba.dimensions();
        let [bg_r, bg_g, bg_b] = self.background;
        let mut out = RgbImage::new(width, height);
        for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
            let [r, g, b, a] = src.0;
            dst.0 = [blend(r, bg_r, a), blend(g, bg_g, a), blend(b, bg_b, a)];
        }
        out
    }
}

/// src over bg at the given alpha, rounded to nearest.
fn blend(src: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((src as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
}
