//! Resize export.

use std::os::raw::c_int;
use std::slice;

use pixbridge_core::{resize_into, PixelLayout, ResizeError};

use crate::types::{dimension, guard, report, FAILURE};

/// Resize a tightly packed 8-bit image with linear (bilinear) resampling.
///
/// `channels` is a pixel layout code: 1, 2, 3 and 4 select one channel,
/// two channels, RGB and RGBA, and the remaining codes follow the
/// stb_image_resize2 `stbir_pixel_layout` numbering (0 = BGR, 5 = four
/// channels without alpha, 6 = BGRA, 7 = ARGB, ... 16 = AR premultiplied).
///
/// Returns 1 on success and 0 on failure. Exactly
/// `dst_width * dst_height * bytes_per_pixel` bytes of `dst` are written.
///
/// # Safety
///
/// `src` must point to `src_width * src_height * bytes_per_pixel` readable
/// bytes and `dst` to `dst_width * dst_height * bytes_per_pixel` writable
/// bytes, and the two regions must not overlap. Null pointers, non-positive
/// dimensions and unknown layout codes are rejected with 0.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn resize_image(
    src: *const u8,
    src_width: c_int,
    src_height: c_int,
    dst: *mut u8,
    dst_width: c_int,
    dst_height: c_int,
    channels: c_int,
) -> c_int {
    if src.is_null() || dst.is_null() {
        log::warn!("resize_image: rejected null buffer");
        return FAILURE;
    }

    guard("resize_image", || {
        let result = unsafe {
            resize_raw(
                src,
                (dimension(src_width), dimension(src_height)),
                dst,
                (dimension(dst_width), dimension(dst_height)),
                channels,
            )
        };
        report("resize_image", result)
    })
}

/// # Safety
///
/// Same contract as [`resize_image`], with non-null pointers.
unsafe fn resize_raw(
    src: *const u8,
    (src_width, src_height): (u32, u32),
    dst: *mut u8,
    (dst_width, dst_height): (u32, u32),
    code: c_int,
) -> Result<(), ResizeError> {
    let layout = PixelLayout::from_code(code).ok_or(ResizeError::UnknownLayout(code))?;

    // Zero dimensions give empty slices here and are rejected by resize_into
    let src_len = layout
        .buffer_len(src_width, src_height)
        .ok_or(ResizeError::DimensionOverflow {
            width: src_width,
            height: src_height,
        })?;
    let dst_len = layout
        .buffer_len(dst_width, dst_height)
        .ok_or(ResizeError::DimensionOverflow {
            width: dst_width,
            height: dst_height,
        })?;

    let src = unsafe { slice::from_raw_parts(src, src_len) };
    let dst = unsafe { slice::from_raw_parts_mut(dst, dst_len) };
    resize_into(src, src_width, src_height, dst, dst_width, dst_height, layout)
}
