// SPDX-License-Identifier: MPL-2.0
//! Decoding downloaded payloads into displayable images.

pub mod image;
pub mod retry_attempts;

// Re-export commonly used types
pub use image::{decode_image, ImageData, ImageDecoder, RasterDecoder};
pub use retry_attempts::MaxRetryAttempts;
