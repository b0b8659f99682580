//! Decodes the uploaded photo into image data ready for a PDF image XObject.
//!
//! Gray and RGB JPEG bytes are embedded untouched (DCTDecode). Everything
//! else, CMYK JPEGs included, is decoded and re-encoded as Flate-compressed
//! 8-bit RGB, with a separate gray soft mask when the source has
//! transparency.

use std::io::{Cursor, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::codecs::jpeg::JpegDecoder;
use image::{ExtendedColorType, GenericImageView, ImageDecoder, ImageFormat};

use crate::render::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoEncoding {
    Jpeg,
    Flate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoColorSpace {
    Gray,
    Rgb,
}

/// Image data in the form the PDF writer embeds it.
#[derive(Debug, Clone)]
pub struct EmbeddedPhoto {
    pub width: u32,
    pub height: u32,
    pub encoding: PhotoEncoding,
    pub color_space: PhotoColorSpace,
    pub data: Vec<u8>,
    /// Flate-compressed 8-bit alpha channel, present only if some pixel is
    /// not fully opaque.
    pub alpha: Option<Vec<u8>>,
}

/// Reads and decodes the photo at `path`.
pub fn load_photo(path: &Path) -> Result<EmbeddedPhoto, RenderError> {
    let bytes = std::fs::read(path).map_err(|source| RenderError::PhotoUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    decode_photo(&bytes)
}

pub fn decode_photo(bytes: &[u8]) -> Result<EmbeddedPhoto, RenderError> {
    let format = image::guess_format(bytes).ok();
    let decoded = image::load_from_memory(bytes)?;
    let (width, height) = decoded.dimensions();

    if format == Some(ImageFormat::Jpeg) {
        let source_color = JpegDecoder::new(Cursor::new(bytes))?.original_color_type();
        if let Some(color_space) = passthrough_color_space(source_color) {
            return Ok(EmbeddedPhoto {
                width,
                height,
                encoding: PhotoEncoding::Jpeg,
                color_space,
                data: bytes.to_vec(),
                alpha: None,
            });
        }
    }

    let rgba = decoded.to_rgba8();
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    let mut alpha = Vec::with_capacity(width as usize * height as usize);
    let mut has_alpha = false;
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        has_alpha |= a != 255;
        rgb.extend_from_slice(&[r, g, b]);
        alpha.push(a);
    }

    Ok(EmbeddedPhoto {
        width,
        height,
        encoding: PhotoEncoding::Flate,
        color_space: PhotoColorSpace::Rgb,
        data: flate_compress(&rgb)?,
        alpha: if has_alpha {
            Some(flate_compress(&alpha)?)
        } else {
            None
        },
    })
}

/// Colour space under which the JPEG's own DCT data can be embedded. `None`
/// means the pixels must be re-encoded.
fn passthrough_color_space(source: ExtendedColorType) -> Option<PhotoColorSpace> {
    match source {
        ExtendedColorType::L8 => Some(PhotoColorSpace::Gray),
        ExtendedColorType::Rgb8 => Some(PhotoColorSpace::Rgb),
        _ => None,
    }
}

fn flate_compress(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(RenderError::Compress)?;
    encoder.finish().map_err(RenderError::Compress)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(img: image::DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_jpeg_passes_through_untouched() {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            8,
            6,
            image::Rgb([10, 120, 200]),
        ));
        let bytes = encode(img, ImageFormat::Jpeg);

        let photo = decode_photo(&bytes).unwrap();
        assert_eq!(photo.encoding, PhotoEncoding::Jpeg);
        assert_eq!(photo.color_space, PhotoColorSpace::Rgb);
        assert_eq!((photo.width, photo.height), (8, 6));
        assert_eq!(photo.data, bytes);
        assert!(photo.alpha.is_none());
    }

    #[test]
    fn test_gray_jpeg_passes_through_as_gray() {
        let img = image::DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
            4,
            4,
            image::Luma([90]),
        ));
        let bytes = encode(img, ImageFormat::Jpeg);

        let photo = decode_photo(&bytes).unwrap();
        assert_eq!(photo.encoding, PhotoEncoding::Jpeg);
        assert_eq!(photo.color_space, PhotoColorSpace::Gray);
    }

    #[test]
    fn test_cmyk_jpeg_is_not_passed_through() {
        assert_eq!(passthrough_color_space(ExtendedColorType::Cmyk8), None);
        assert_eq!(
            passthrough_color_space(ExtendedColorType::Rgb8),
            Some(PhotoColorSpace::Rgb)
        );
        assert_eq!(
            passthrough_color_space(ExtendedColorType::L8),
            Some(PhotoColorSpace::Gray)
        );
    }

    #[test]
    fn test_opaque_png_has_no_mask() {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            4,
            4,
            image::Rgb([0, 0, 0]),
        ));
        let photo = decode_photo(&encode(img, ImageFormat::Png)).unwrap();
        assert_eq!(photo.encoding, PhotoEncoding::Flate);
        assert!(photo.alpha.is_none());
    }

    #[test]
    fn test_transparent_png_gets_mask() {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            3,
            3,
            image::Rgba([255, 0, 0, 128]),
        ));
        let photo = decode_photo(&encode(img, ImageFormat::Png)).unwrap();
        assert!(photo.alpha.is_some());
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let err = decode_photo(b"definitely not an image").unwrap_err();
        assert!(matches!(err, RenderError::PhotoDecode(_)));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_photo(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, RenderError::PhotoUnreadable { .. }));
    }
}
