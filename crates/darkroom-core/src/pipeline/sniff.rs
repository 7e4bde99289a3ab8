//! Container format detection from byte content.
//!
//! The allow-list is a closed enum: a format is accepted only if its magic
//! signature matches here AND the corresponding decoder feature is compiled
//! in. Filenames and declared content types play no part.

use image::ImageFormat;

/// The closed set of container formats the pipeline will decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    WebP,
    Bmp,
    Tiff,
}

impl ImageKind {
    /// The `image` crate format used to drive the decoder.
    ///
    /// The decoder is always pinned to the sniffed format — no guessing, no
    /// registry lookup.
    pub fn format(&self) -> ImageFormat {
        match self {
            ImageKind::Jpeg => ImageFormat::Jpeg,
            ImageKind::Png => ImageFormat::Png,
            ImageKind::Gif => ImageFormat::Gif,
            ImageKind::WebP => ImageFormat::WebP,
            ImageKind::Bmp => ImageFormat::Bmp,
            ImageKind::Tiff => ImageFormat::Tiff,
        }
    }

    /// Lowercase name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpeg",
            ImageKind::Png => "png",
            ImageKind::Gif => "gif",
            ImageKind::WebP => "webp",
            ImageKind::Bmp => "bmp",
            ImageKind::Tiff => "tiff",
        }
    }
}

/// Detect the container format from leading magic bytes.
///
/// Returns `None` for anything outside the allow-list, including inputs too
/// short to carry a complete signature. A `Some` here proves nothing about
/// structural validity — that is the decoder's job — only that the bytes
/// claim a format the pipeline is willing to decode.
pub fn detect(bytes: &[u8]) -> Option<ImageKind> {
    // JPEG: FF D8 FF
    if bytes.len() >= 3 && bytes[0] == 0xFF && bytes[1] == 0xD8 && bytes[2] == 0xFF {
        return Some(ImageKind::Jpeg);
    }

    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        return Some(ImageKind::Png);
    }

    // GIF: GIF87a or GIF89a
    if bytes.len() >= 6 && (&bytes[0..6] == b"GIF87a" || &bytes[0..6] == b"GIF89a") {
        return Some(ImageKind::Gif);
    }

    // WebP: RIFF....WEBP — both fourccs required, a bare RIFF could be
    // a WAV or any other RIFF container
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some(ImageKind::WebP);
    }

    // BMP: BM
    if bytes.len() >= 2 && &bytes[0..2] == b"BM" {
        return Some(ImageKind::Bmp);
    }

    // TIFF: II + version 42 (little-endian) or MM + version 42 (big-endian)
    if bytes.len() >= 4 {
        let is_tiff_le =
            bytes[0] == b'I' && bytes[1] == b'I' && bytes[2] == 0x2A && bytes[3] == 0x00;
        let is_tiff_be =
            bytes[0] == b'M' && bytes[1] == b'M' && bytes[2] == 0x00 && bytes[3] == 0x2A;
        if is_tiff_le || is_tiff_be {
            return Some(ImageKind::Tiff);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_jpeg() {
        let header = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(detect(&header), Some(ImageKind::Jpeg));
    }

    #[test]
    fn test_detect_png() {
        let header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(detect(&header), Some(ImageKind::Png));
    }

    #[test]
    fn test_detect_gif_both_versions() {
        assert_eq!(detect(b"GIF87a\x01\x00"), Some(ImageKind::Gif));
        assert_eq!(detect(b"GIF89a\x01\x00"), Some(ImageKind::Gif));
        assert_eq!(detect(b"GIF90a\x01\x00"), None);
    }

    #[test]
    fn test_detect_webp_requires_both_fourccs() {
        let mut webp = [0u8; 12];
        webp[0..4].copy_from_slice(b"RIFF");
        webp[8..12].copy_from_slice(b"WEBP");
        assert_eq!(detect(&webp), Some(ImageKind::WebP));

        let mut wav = [0u8; 12];
        wav[0..4].copy_from_slice(b"RIFF");
        wav[8..12].copy_from_slice(b"WAVE");
        assert_eq!(detect(&wav), None);
    }

    #[test]
    fn test_detect_tiff_endianness() {
        assert_eq!(detect(&[b'I', b'I', 0x2A, 0x00]), Some(ImageKind::Tiff));
        assert_eq!(detect(&[b'M', b'M', 0x00, 0x2A]), Some(ImageKind::Tiff));
        // Bare byte-order marks without the version are not TIFF
        assert_eq!(detect(&[b'I', b'I', 0x00, 0x00]), None);
        assert_eq!(detect(&[b'M', b'M', 0x00, 0x00]), None);
    }

    #[test]
    fn test_detect_rejects_garbage() {
        assert_eq!(detect(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05]), None);
        assert_eq!(detect(b"not an image"), None);
    }

    #[test]
    fn test_detect_rejects_empty_and_short_input() {
        assert_eq!(detect(&[]), None);
        assert_eq!(detect(&[0xFF]), None);
        assert_eq!(detect(&[0xFF, 0xD8]), None);
    }

    #[test]
    fn test_kind_format_mapping() {
        assert_eq!(ImageKind::Png.format(), image::ImageFormat::Png);
        assert_eq!(ImageKind::Jpeg.as_str(), "jpeg");
    }
}
