//! Pixbridge Core - image I/O behind the pixbridge C boundary
//!
//! This crate holds the safe half of pixbridge: slice-based JPEG decoding
//! into caller-owned RGB buffers and linear resizing between caller-owned
//! pixel buffers. Decoding is delegated to the `image` crate's JPEG codec
//! and resampling to `fast_image_resize`; this crate only marshals buffers,
//! checks sizes and scopes decoder state to a single call.
//!
//! Nothing here keeps state between calls.

pub mod decode;
pub mod encode;
pub mod probe;
pub mod resize;

pub use decode::{
    decode_jpeg, decode_jpeg_into, read_jpeg_header, DecodeError, DecodedImage, JpegHeader,
    OUTPUT_CHANNELS,
};
pub use probe::probe_decoder;
pub use resize::{resize_into, PixelLayout, ResizeError};
