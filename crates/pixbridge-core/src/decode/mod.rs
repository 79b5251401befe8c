//! JPEG decoding boundary.
//!
//! This module provides functionality for:
//! - Parsing JPEG headers to discover dimensions before allocating
//! - Decoding JPEG payloads into caller-owned, tightly packed RGB buffers
//! - Decoding into a freshly allocated image for Rust callers
//!
//! # Output policy
//!
//! Output is always 3-channel RGB regardless of the source color model.
//! Grayscale sources are expanded (R = G = B) and CMYK sources are
//! converted by the decoder. EXIF orientation is not applied.
//!
//! # Sessions
//!
//! Decoder state lives in a per-call session (see [`SessionSource`]). The
//! session is dropped on every exit path, so it is released exactly once per
//! call, and empty payloads are rejected before one is opened.
//!
//! # Examples
//!
//! ```ignore
//! use pixbridge_core::decode::{decode_jpeg_into, read_jpeg_header};
//!
//! let jpeg_bytes = std::fs::read("photo.jpg").unwrap();
//! let header = read_jpeg_header(&jpeg_bytes).unwrap();
//! let mut rgb = vec![0u8; header.rgb_len().unwrap()];
//! decode_jpeg_into(&jpeg_bytes, &mut rgb).unwrap();
//! ```

mod jpeg;
mod session;
mod types;

pub use jpeg::{
    decode_jpeg, decode_jpeg_into, decode_jpeg_with, read_jpeg_header, read_jpeg_header_with,
};
pub use session::{ImageJpegSession, ImageJpegSource, JpegSession, SessionSource};
pub use types::{DecodeError, DecodedImage, JpegHeader, SourceColor, OUTPUT_CHANNELS};
