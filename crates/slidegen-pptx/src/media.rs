//! Raster images embedded into slides.
//!
//! Images are decoded just far enough to learn their format and pixel
//! dimensions; the original bytes are embedded unchanged.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};

use crate::error::{PptxError, Result};

/// An image ready to be placed on a slide
#[derive(Debug, Clone)]
pub struct Image {
    /// Raw encoded bytes
    data: Vec<u8>,

    /// Detected encoding
    format: ImageFormat,

    /// Width in pixels
    width_px: u32,

    /// Height in pixels
    height_px: u32,
}

impl Image {
    /// Load an image from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| PptxError::image_error(path.display().to_string(), e.to_string()))?;
        Self::decode(data, &path.display().to_string())
    }

    /// Wrap already-encoded image bytes (e.g. a rendered chart)
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::decode(data, "<memory>")
    }

    fn decode(data: Vec<u8>, origin: &str) -> Result<Self> {
        let reader = ImageReader::new(Cursor::new(&data))
            .with_guessed_format()
            .map_err(|e| PptxError::image_error(origin, e.to_string()))?;

        let format = reader
            .format()
            .ok_or_else(|| PptxError::image_error(origin, "unrecognized image format"))?;

        if extension_for(format).is_none() {
            return Err(PptxError::unsupported_image(format!("{:?}", format)));
        }

        let (width_px, height_px) = reader
            .into_dimensions()
            .map_err(|e| PptxError::image_error(origin, e.to_string()))?;

        if width_px == 0 || height_px == 0 {
            return Err(PptxError::image_error(origin, "image has no pixels"));
        }

        Ok(Self {
            data,
            format,
            width_px,
            height_px,
        })
    }

    /// Raw encoded bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel dimensions (width, height)
    pub fn dimensions_px(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    /// File extension used for the media part
    pub fn extension(&self) -> &'static str {
        // Checked in `decode`
        extension_for(self.format).unwrap_or("png")
    }

    /// MIME content type for `[Content_Types].xml`
    pub fn content_type(&self) -> &'static str {
        content_type_for_extension(self.extension())
    }

    /// Width in EMU that keeps the aspect ratio at the given height
    pub fn width_for_height(&self, height_emu: i64) -> i64 {
        (height_emu as f64 * self.width_px as f64 / self.height_px as f64).round() as i64
    }

    /// Height in EMU that keeps the aspect ratio at the given width
    pub fn height_for_width(&self, width_emu: i64) -> i64 {
        (width_emu as f64 * self.height_px as f64 / self.width_px as f64).round() as i64
    }
}

fn extension_for(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("png"),
        ImageFormat::Jpeg => Some("jpeg"),
        ImageFormat::Gif => Some("gif"),
        ImageFormat::Bmp => Some("bmp"),
        ImageFormat::Tiff => Some("tiff"),
        _ => None,
    }
}

/// Content type for a media file extension
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpeg" | "jpg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Encode a solid RGB image as PNG
    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let buffer = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
        let mut out = Cursor::new(Vec::new());
        buffer
            .write_to(&mut out, ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    #[test]
    fn test_from_bytes_reads_dimensions() {
        let image = Image::from_bytes(png_bytes(40, 20)).unwrap();
        assert_eq!(image.dimensions_px(), (40, 20));
        assert_eq!(image.extension(), "png");
        assert_eq!(image.content_type(), "image/png");
    }

    #[test]
    fn test_aspect_ratio_scaling() {
        let image = Image::from_bytes(png_bytes(40, 20)).unwrap();
        assert_eq!(image.width_for_height(1_000), 2_000);
        assert_eq!(image.height_for_width(1_000), 500);
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = Image::from_bytes(b"definitely not an image".to_vec()).unwrap_err();
        assert!(matches!(err, PptxError::ImageError { .. }));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Image::load("/nonexistent/picture.png").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/picture.png"));
    }

    #[test]
    fn test_content_type_for_extension() {
        assert_eq!(content_type_for_extension("jpg"), "image/jpeg");
        assert_eq!(content_type_for_extension("gif"), "image/gif");
        assert_eq!(content_type_for_extension("xyz"), "application/octet-stream");
    }
}
