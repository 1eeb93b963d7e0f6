//! Company logo embedded as an image XObject

use std::path::Path;

use crate::PdfError;

/// Decoded logo ready to embed: 8-bit RGB samples plus an optional alpha plane
#[derive(Debug, Clone)]
pub struct Logo {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl Logo {
    /// Decode a PNG or JPEG image
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfError> {
        let rgba = image::load_from_memory(bytes)
            .map_err(|e| PdfError::Logo(e.to_string()))?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(PdfError::Logo("empty image".to_string()));
        }

        let pixels = rgba.into_raw();
        let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
        let mut alpha = Vec::with_capacity(pixels.len() / 4);
        for px in pixels.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
            alpha.push(px[3]);
        }
        let alpha = alpha.iter().any(|&a| a < u8::MAX).then_some(alpha);

        Ok(Self {
            width,
            height,
            rgb,
            alpha,
        })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, PdfError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| PdfError::Logo(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    pub(crate) fn alpha(&self) -> Option<&[u8]> {
        self.alpha.as_deref()
    }

    /// Largest size with this aspect ratio that fits a `side` x `side` box
    pub(crate) fn fit(&self, side: f32) -> (f32, f32) {
        let scale = side / self.width.max(self.height) as f32;
        (self.width as f32 * scale, self.height as f32 * scale)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    pub(crate) fn png(width: u32, height: u32, alpha: u8) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([26, 35, 126, alpha]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_opaque_png_has_no_alpha_plane() {
        let logo = Logo::from_bytes(&png(4, 2, 255)).unwrap();
        assert_eq!((logo.width(), logo.height()), (4, 2));
        assert_eq!(logo.rgb().len(), 4 * 2 * 3);
        assert!(logo.alpha().is_none());
    }

    #[test]
    fn test_translucent_png_keeps_alpha() {
        let logo = Logo::from_bytes(&png(3, 3, 128)).unwrap();
        assert_eq!(logo.alpha().map(<[u8]>::len), Some(9));
    }

    #[test]
    fn test_fit_preserves_aspect_ratio() {
        let logo = Logo::from_bytes(&png(200, 100, 255)).unwrap();
        let (w, h) = logo.fit(50.0);
        assert!((w - 50.0).abs() < 0.01);
        assert!((h - 25.0).abs() < 0.01);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(Logo::from_bytes(b"not an image"), Err(PdfError::Logo(_))));
        assert!(matches!(Logo::open("/nonexistent/logo.png"), Err(PdfError::Logo(_))));
    }
}
