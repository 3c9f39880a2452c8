// SPDX-License-Identifier: MPL-2.0
//! Image decoding from downloaded bytes (PNG, JPEG, GIF, WebP, etc.).

use crate::error::LoadError;
use iced::widget::image;
use image_rs::{GenericImageView, ImageError};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
    /// Decoded RGBA bytes, shared so clones stay cheap.
    rgba_bytes: Arc<Vec<u8>>,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    ///
    /// The pixels are stored in an Arc for shared ownership, and a copy is
    /// made for the Handle.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let rgba_bytes = Arc::new(pixels);
        let handle = image::Handle::from_rgba(width, height, rgba_bytes.to_vec());
        Self {
            handle,
            width,
            height,
            rgba_bytes,
        }
    }

    /// Returns a reference to the decoded RGBA bytes.
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba_bytes.len())
            .finish()
    }
}

impl PartialEq for ImageData {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && (Arc::ptr_eq(&self.rgba_bytes, &other.rgba_bytes)
                || self.rgba_bytes == other.rgba_bytes)
    }
}

/// Turns a downloaded payload into something the view can display.
pub trait ImageDecoder: Send + Sync {
    /// # Errors
    ///
    /// Returns [`LoadError::Decode`] when the bytes are empty or not a
    /// supported image.
    fn decode(&self, bytes: &[u8]) -> Result<ImageData, LoadError>;
}

/// Decoder for the raster formats compiled into the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<ImageData, LoadError> {
        decode_image(bytes)
    }
}

/// Decode an in-memory encoded image.
///
/// # Errors
///
/// Returns [`LoadError::Decode`] if the payload is empty, the format is not
/// recognized, or the data is corrupt.
pub fn decode_image(bytes: &[u8]) -> Result<ImageData, LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::Decode("empty payload".into()));
    }

    let img = image_rs::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();
    let pixels = img.to_rgba8().into_vec();

    Ok(ImageData::from_rgba(width, height, pixels))
}

impl From<ImageError> for LoadError {
    fn from(err: ImageError) -> Self {
        LoadError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encoded(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, format)
            .expect("failed to encode test image");
        bytes.into_inner()
    }

    #[test]
    fn decode_png_returns_expected_dimensions() {
        let data = decode_image(&encoded(ImageFormat::Png, 4, 2)).expect("png should decode");
        assert_eq!(data.width, 4);
        assert_eq!(data.height, 2);
        assert_eq!(data.rgba_bytes().len(), 4 * 2 * 4);
        assert_eq!(&data.rgba_bytes()[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn decode_bmp_through_raster_decoder() {
        let data = RasterDecoder
            .decode(&encoded(ImageFormat::Bmp, 3, 3))
            .expect("bmp should decode");
        assert_eq!((data.width, data.height), (3, 3));
    }

    #[test]
    fn empty_payload_is_a_decode_error() {
        match decode_image(&[]) {
            Err(LoadError::Decode(message)) => assert_eq!(message, "empty payload"),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn garbage_payload_is_a_decode_error() {
        match decode_image(b"<html>not found</html>") {
            Err(LoadError::Decode(message)) => assert!(!message.is_empty()),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn truncated_png_is_a_decode_error() {
        let bytes = encoded(ImageFormat::Png, 8, 8);
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(LoadError::Decode(_))));
    }

    #[test]
    fn equality_compares_pixels_not_handles() {
        let a = ImageData::from_rgba(1, 1, vec![1, 2, 3, 4]);
        let b = ImageData::from_rgba(1, 1, vec![1, 2, 3, 4]);
        let c = ImageData::from_rgba(1, 1, vec![4, 3, 2, 1]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, a.clone());
    }
}
