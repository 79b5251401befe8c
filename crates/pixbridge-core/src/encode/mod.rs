//! JPEG encoding used by the decoder probe and by tests.
//!
//! The boundary itself only decodes; encoding exists so the crate can build
//! known-good payloads at runtime without shipping binary fixtures.
//!
//! # Examples
//!
//! ```ignore
//! use pixbridge_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, encode_jpeg_luma, EncodeError};
