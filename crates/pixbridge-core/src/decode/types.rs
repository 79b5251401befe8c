//! Core types for JPEG decoding.

use image::ColorType;
use thiserror::Error;

/// Number of interleaved samples every decode writes per pixel (RGB).
///
/// Grayscale sources are expanded and CMYK sources are converted by the
/// decoder, so callers can always size buffers as `width * height * 3`.
pub const OUTPUT_CHANNELS: u32 = 3;

/// Error types for JPEG decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload was empty.
    #[error("Empty JPEG payload")]
    EmptyPayload,

    /// A decompression session could not be opened.
    #[error("Failed to open decompression session: {0}")]
    SessionUnavailable(String),

    /// The payload header could not be parsed.
    #[error("Invalid JPEG header: {0}")]
    InvalidHeader(String),

    /// The decoder reported a pixel format that cannot be delivered as RGB.
    #[error("Unsupported source color type: {0:?}")]
    UnsupportedColor(ColorType),

    /// The destination cannot hold the decoded image.
    #[error("Destination buffer too small: need {required} bytes, have {capacity}")]
    BufferTooSmall { required: usize, capacity: usize },

    /// The image dimensions overflow the addressable buffer size.
    #[error("Image dimensions {width}x{height} overflow the pixel buffer size")]
    DimensionOverflow { width: u32, height: u32 },

    /// Decompression of the entropy-coded data failed.
    #[error("Decompression failed: {0}")]
    DecompressFailed(String),
}

/// Color model reported by the JPEG header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceColor {
    /// Single luminance channel.
    Grayscale,
    /// Three color channels (YCbCr or RGB, and CMYK after decoder conversion).
    Rgb,
    /// Anything else the decoder reports.
    Other(ColorType),
}

impl From<ColorType> for SourceColor {
    fn from(value: ColorType) -> Self {
        match value {
            ColorType::L8 => SourceColor::Grayscale,
            ColorType::Rgb8 => SourceColor::Rgb,
            other => SourceColor::Other(other),
        }
    }
}

/// Dimensions and color model parsed from a JPEG header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegHeader {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Color model of the encoded data.
    pub source_color: SourceColor,
}

impl JpegHeader {
    /// Channels written per pixel, independent of the source color model.
    #[inline]
    pub fn channels(&self) -> u32 {
        OUTPUT_CHANNELS
    }

    /// Row pitch of the RGB output in bytes (tight packing).
    pub fn pitch(&self) -> Result<usize, DecodeError> {
        (self.width as usize)
            .checked_mul(OUTPUT_CHANNELS as usize)
            .ok_or(self.overflow())
    }

    /// Size in bytes of the RGB output buffer.
    pub fn rgb_len(&self) -> Result<usize, DecodeError> {
        self.pitch()?
            .checked_mul(self.height as usize)
            .ok_or(self.overflow())
    }

    fn overflow(&self) -> DecodeError {
        DecodeError::DimensionOverflow {
            width: self.width,
            height: self.height,
        }
    }
}

/// A decoded image with RGB pixel data.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * OUTPUT_CHANNELS as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
