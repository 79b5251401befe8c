//! JPEG decoding exports.
//!
//! # Functions
//!
//! - [`decode_jpeg`] - Decode into a destination the caller has pre-sized
//! - [`decode_jpeg_checked`] - Same, with an explicit destination capacity
//! - [`peek_jpeg_header`] - Read width, height and channels without decoding
//! - [`test_turbojpeg`] - Report whether the decoder initializes
//!
//! Output is always tightly packed RGB, so `channels` is always written as 3.
//! Out-parameters are written only when the call succeeds.
//!
//! # Example
//!
//! ```c
//! int w, h, c;
//! if (peek_jpeg_header(jpeg, jpeg_len, &w, &h, &c)) {
//!     uint8_t *rgb = malloc((size_t)w * h * c);
//!     decode_jpeg_checked(jpeg, jpeg_len, rgb, (size_t)w * h * c, &w, &h, &c);
//! }
//! ```

use std::os::raw::c_int;
use std::slice;

use pixbridge_core::decode::{self, ImageJpegSource, SessionSource};
use pixbridge_core::{probe_decoder, DecodeError};

use crate::types::{guard, report, store_header, FAILURE};

/// Decode a JPEG payload into tightly packed RGB.
///
/// Returns 1 on success and 0 on any failure. On success `width` and
/// `height` hold the image dimensions, `channels` holds 3 and `output_buf`
/// holds `width * height * 3` bytes.
///
/// # Safety
///
/// `jpeg_buf` must point to `jpeg_size` readable bytes. `output_buf` must
/// point to at least `width * height * 3` writable bytes for the image the
/// payload encodes, and must not overlap `jpeg_buf`. Use
/// [`peek_jpeg_header`] or [`decode_jpeg_checked`] when that size is not
/// known up front. `width`, `height` and `channels` must be valid for writes.
/// Null pointers and a non-positive `jpeg_size` are rejected with 0.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn decode_jpeg(
    jpeg_buf: *const u8,
    jpeg_size: c_int,
    output_buf: *mut u8,
    width: *mut c_int,
    height: *mut c_int,
    channels: *mut c_int,
) -> c_int {
    unsafe {
        decode_jpeg_from(
            &ImageJpegSource,
            jpeg_buf,
            jpeg_size,
            output_buf,
            width,
            height,
            channels,
        )
    }
}

/// [`decode_jpeg`] over an explicit session source.
///
/// Rejected arguments return before a session is opened.
///
/// # Safety
///
/// Same contract as [`decode_jpeg`].
unsafe fn decode_jpeg_from<S: SessionSource>(
    source: &S,
    jpeg_buf: *const u8,
    jpeg_size: c_int,
    output_buf: *mut u8,
    width: *mut c_int,
    height: *mut c_int,
    channels: *mut c_int,
) -> c_int {
    if jpeg_buf.is_null()
        || jpeg_size <= 0
        || output_buf.is_null()
        || width.is_null()
        || height.is_null()
        || channels.is_null()
    {
        log::warn!("decode_jpeg: rejected null pointer or empty payload");
        return FAILURE;
    }

    guard("decode_jpeg", || {
        let payload = unsafe { slice::from_raw_parts(jpeg_buf, jpeg_size as usize) };
        let result = decode::decode_jpeg_with(source, payload, |header| {
            let len = header.rgb_len()?;
            Ok(unsafe { slice::from_raw_parts_mut(output_buf, len) })
        })
        .and_then(|header| unsafe { store_header(&header, width, height, channels) });
        report("decode_jpeg", result)
    })
}

/// Decode a JPEG payload into a destination of known capacity.
///
/// Behaves like [`decode_jpeg`] but fails with 0, before decompressing,
/// when `output_capacity` is smaller than `width * height * 3`.
///
/// # Safety
///
/// `jpeg_buf` must point to `jpeg_size` readable bytes and `output_buf` to
/// `output_capacity` writable bytes that do not overlap it. `width`,
/// `height` and `channels` must be valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn decode_jpeg_checked(
    jpeg_buf: *const u8,
    jpeg_size: c_int,
    output_buf: *mut u8,
    output_capacity: usize,
    width: *mut c_int,
    height: *mut c_int,
    channels: *mut c_int,
) -> c_int {
    if jpeg_buf.is_null()
        || jpeg_size <= 0
        || output_buf.is_null()
        || width.is_null()
        || height.is_null()
        || channels.is_null()
    {
        log::warn!("decode_jpeg_checked: rejected null pointer or empty payload");
        return FAILURE;
    }

    guard("decode_jpeg_checked", || {
        let payload = unsafe { slice::from_raw_parts(jpeg_buf, jpeg_size as usize) };
        let out = unsafe { slice::from_raw_parts_mut(output_buf, output_capacity) };
        let result = decode::decode_jpeg_into(payload, out)
            .and_then(|header| unsafe { store_header(&header, width, height, channels) });
        report("decode_jpeg_checked", result)
    })
}

/// Read the dimensions of a JPEG payload without decompressing it.
///
/// On success writes the width, the height and the output channel count (3)
/// so the caller can size the buffer for [`decode_jpeg`].
///
/// # Safety
///
/// `jpeg_buf` must point to `jpeg_size` readable bytes. `width`, `height`
/// and `channels` must be valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn peek_jpeg_header(
    jpeg_buf: *const u8,
    jpeg_size: c_int,
    width: *mut c_int,
    height: *mut c_int,
    channels: *mut c_int,
) -> c_int {
    if jpeg_buf.is_null()
        || jpeg_size <= 0
        || width.is_null()
        || height.is_null()
        || channels.is_null()
    {
        log::warn!("peek_jpeg_header: rejected null pointer or empty payload");
        return FAILURE;
    }

    guard("peek_jpeg_header", || {
        let payload = unsafe { slice::from_raw_parts(jpeg_buf, jpeg_size as usize) };
        let result: Result<(), DecodeError> = decode::read_jpeg_header(payload)
            .and_then(|header| unsafe { store_header(&header, width, height, channels) });
        report("peek_jpeg_header", result)
    })
}

/// Report whether the JPEG decoder initializes and decodes in this process.
///
/// Returns 1 if a self-test image round-trips through the decoder, 0
/// otherwise.
#[unsafe(no_mangle)]
pub extern "C" fn test_turbojpeg() -> c_int {
    guard("test_turbojpeg", || report("test_turbojpeg", probe_decoder()))
}
