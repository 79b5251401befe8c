//! Linear resampling of caller-owned 8-bit pixel buffers.
//!
//! The resampling itself is done by `fast_image_resize`; this module maps
//! host layouts onto its pixel types, checks buffer sizes and writes the
//! result straight into the destination slice. Samples are treated as
//! linear values (no gamma decoding) and rows are tightly packed.
//!
//! Straight-alpha layouts are resampled alpha-weighted. Alpha-first
//! layouts are rotated into alpha-last order for the resampler and
//! rotated back in the destination.

mod layout;

pub use layout::{AlphaMode, PixelLayout};

use fast_image_resize as fr;
use fr::images::{Image as FrImage, ImageRef};
use thiserror::Error;

/// Error types for resize operations.
#[derive(Debug, Error)]
pub enum ResizeError {
    /// The layout code is not one the resampler recognizes.
    #[error("Unknown pixel layout code: {0}")]
    UnknownLayout(i32),

    /// Width or height is zero on either side.
    #[error("Invalid dimensions: {src_width}x{src_height} -> {dst_width}x{dst_height}")]
    InvalidDimensions {
        src_width: u32,
        src_height: u32,
        dst_width: u32,
        dst_height: u32,
    },

    /// A buffer is shorter than its dimensions require.
    #[error("{which} buffer too small: need {required} bytes, have {actual}")]
    BufferTooSmall {
        which: &'static str,
        required: usize,
        actual: usize,
    },

    /// Buffer size computation overflowed.
    #[error("Image dimensions {width}x{height} overflow the pixel buffer size")]
    DimensionOverflow { width: u32, height: u32 },

    /// The resampler rejected the request.
    #[error("Resampler failed: {0}")]
    Resampler(String),
}

/// Bilinear convolution, the linear kernel hosts expect.
const RESIZE_ALG: fr::ResizeAlg = fr::ResizeAlg::Convolution(fr::FilterType::Bilinear);

/// Resize `src` into `dst` with bilinear resampling.
///
/// Writes exactly `dst_width * dst_height * layout.channels()` bytes at the
/// start of `dst`; any bytes beyond that are left untouched.
///
/// # Errors
///
/// Returns `ResizeError::InvalidDimensions` if any dimension is zero and
/// `ResizeError::BufferTooSmall` if either buffer is shorter than its
/// dimensions require.
pub fn resize_into(
    src: &[u8],
    src_width: u32,
    src_height: u32,
    dst: &mut [u8],
    dst_width: u32,
    dst_height: u32,
    layout: PixelLayout,
) -> Result<(), ResizeError> {
    if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
        return Err(ResizeError::InvalidDimensions {
            src_width,
            src_height,
            dst_width,
            dst_height,
        });
    }

    let src = checked_region(src, src_width, src_height, layout, "Source")?;
    let dst = checked_region_mut(dst, dst_width, dst_height, layout, "Destination")?;

    // Fast path: same dimensions is a plain copy
    if src_width == dst_width && src_height == dst_height {
        dst.copy_from_slice(src);
        return Ok(());
    }

    let channels = layout.channels();
    let alpha = layout.alpha();

    // The resampler only understands alpha in the last channel
    let rotated;
    let src = if alpha == AlphaMode::First {
        let mut buf = src.to_vec();
        buf.chunks_exact_mut(channels)
            .for_each(|px| px.rotate_left(1));
        rotated = buf;
        rotated.as_slice()
    } else {
        src
    };

    let pixel_type = layout.pixel_type();
    let src_image = ImageRef::new(src_width, src_height, src, pixel_type)
        .map_err(|e| ResizeError::Resampler(e.to_string()))?;
    let mut dst_image = FrImage::from_slice_u8(dst_width, dst_height, dst, pixel_type)
        .map_err(|e| ResizeError::Resampler(e.to_string()))?;

    let options = fr::ResizeOptions::new()
        .resize_alg(RESIZE_ALG)
        .use_alpha(matches!(alpha, AlphaMode::Last | AlphaMode::First));

    let mut resizer = fr::Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| ResizeError::Resampler(e.to_string()))?;
    drop(dst_image);

    if alpha == AlphaMode::First {
        dst.chunks_exact_mut(channels)
            .for_each(|px| px.rotate_right(1));
    }

    log::debug!(
        "Resized {}x{} -> {}x{} ({:?})",
        src_width,
        src_height,
        dst_width,
        dst_height,
        layout
    );
    Ok(())
}

fn required_len(
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<usize, ResizeError> {
    layout
        .buffer_len(width, height)
        .ok_or(ResizeError::DimensionOverflow { width, height })
}

fn checked_region<'a>(
    buf: &'a [u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    which: &'static str,
) -> Result<&'a [u8], ResizeError> {
    let required = required_len(width, height, layout)?;
    buf.get(..required).ok_or(ResizeError::BufferTooSmall {
        which,
        required,
        actual: buf.len(),
    })
}

fn checked_region_mut<'a>(
    buf: &'a mut [u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    which: &'static str,
) -> Result<&'a mut [u8], ResizeError> {
    let required = required_len(width, height, layout)?;
    let actual = buf.len();
    buf.get_mut(..required).ok_or(ResizeError::BufferTooSmall {
        which,
        required,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gradient(width: u32, height: u32, channels: usize) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * channels);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    let v = match c % 3 {
                        0 => (x * 255) / width.max(1),
                        1 => (y * 255) / height.max(1),
                        _ => 128,
                    };
                    pixels.push(v as u8);
                }
            }
        }
        pixels
    }

    #[test]
    fn test_resize_rgb_half() {
        let src = gradient(100, 100, 3);
        let mut dst = vec![0u8; 50 * 50 * 3];
        resize_into(&src, 100, 100, &mut dst, 50, 50, PixelLayout::Rgb).unwrap();

        // Gradient survives the downscale: left edge dark, right edge bright
        assert!(dst[0] < 10);
        assert!(dst[49 * 3] > 240);
    }

    #[test]
    fn test_resize_leaves_sentinels_untouched() {
        const SENTINEL: u8 = 0xAB;
        let src = gradient(100, 100, 3);
        let region = 50 * 50 * 3;
        let mut backing = vec![SENTINEL; region + 64];

        resize_into(
            &src,
            100,
            100,
            &mut backing[32..],
            50,
            50,
            PixelLayout::Rgb,
        )
        .unwrap();

        assert!(backing[..32].iter().all(|&b| b == SENTINEL));
        assert!(backing[32 + region..].iter().all(|&b| b == SENTINEL));
    }

    #[test]
    fn test_resize_to_single_pixel() {
        let src = vec![200u8; 64 * 64 * 4];
        let mut dst = [0u8; 4];
        resize_into(&src, 64, 64, &mut dst, 1, 1, PixelLayout::FourChannel).unwrap();
        assert_eq!(dst, [200, 200, 200, 200]);
    }

    #[test]
    fn test_resize_same_dimensions_copies() {
        let src = gradient(16, 8, 3);
        let mut dst = vec![0u8; src.len()];
        resize_into(&src, 16, 8, &mut dst, 16, 8, PixelLayout::Bgr).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_resize_upscale_grayscale() {
        let src = gradient(10, 10, 1);
        let mut dst = vec![0u8; 40 * 30];
        resize_into(&src, 10, 10, &mut dst, 40, 30, PixelLayout::OneChannel).unwrap();
        assert!(dst.iter().any(|&v| v > 0));
    }

    #[test]
    fn test_resize_alpha_first_keeps_alpha_position() {
        // Opaque ARGB: alpha stays in the first byte of every pixel
        let mut src = Vec::new();
        for _ in 0..(8 * 8) {
            src.extend_from_slice(&[255, 10, 20, 30]);
        }
        let mut dst = vec![0u8; 4 * 4 * 4];
        resize_into(&src, 8, 8, &mut dst, 4, 4, PixelLayout::Argb).unwrap();

        for px in dst.chunks_exact(4) {
            assert_eq!(px, &[255, 10, 20, 30]);
        }
    }

    #[test]
    fn test_resize_straight_alpha_ignores_transparent_color() {
        // Left half transparent red, right half opaque blue
        let mut src = Vec::new();
        for _y in 0..4 {
            for x in 0..4 {
                if x < 2 {
                    src.extend_from_slice(&[255, 0, 0, 0]);
                } else {
                    src.extend_from_slice(&[0, 0, 255, 255]);
                }
            }
        }
        let mut dst = [0u8; 4];
        resize_into(&src, 4, 4, &mut dst, 1, 1, PixelLayout::Rgba).unwrap();

        // Alpha-weighted: the transparent red must not bleed into the color
        assert!(dst[0] < 16, "red leaked: {:?}", dst);
        assert!(dst[2] > 240, "blue lost: {:?}", dst);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let src = gradient(10, 10, 3);
        let mut dst = vec![0u8; 300];
        assert!(matches!(
            resize_into(&src, 10, 10, &mut dst, 0, 10, PixelLayout::Rgb),
            Err(ResizeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            resize_into(&src, 0, 10, &mut dst, 10, 10, PixelLayout::Rgb),
            Err(ResizeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_resize_short_buffers_error() {
        let src = gradient(10, 10, 3);
        let mut dst = vec![0u8; 5 * 5 * 3 - 1];
        match resize_into(&src, 10, 10, &mut dst, 5, 5, PixelLayout::Rgb) {
            Err(ResizeError::BufferTooSmall {
                which, required, ..
            }) => {
                assert_eq!(which, "Destination");
                assert_eq!(required, 75);
            }
            other => panic!("Expected BufferTooSmall, got {:?}", other),
        }

        let mut dst = vec![0u8; 75];
        assert!(matches!(
            resize_into(&src[..299], 10, 10, &mut dst, 5, 5, PixelLayout::Rgb),
            Err(ResizeError::BufferTooSmall {
                which: "Source",
                ..
            })
        ));
    }

    #[test]
    fn test_resize_bilinear_blends_neighbours() {
        // Black and white halves meet in the middle of a 4x1 strip
        let src = [0u8, 0, 255, 255];
        let mut dst = [0u8; 2];
        resize_into(&src, 4, 1, &mut dst, 2, 1, PixelLayout::OneChannel).unwrap();
        assert!(dst[0] < 128);
        assert!(dst[1] > 128);

        // Upscaling interpolates between samples instead of repeating them
        let src = [0u8, 255];
        let mut dst = [0u8; 4];
        resize_into(&src, 2, 1, &mut dst, 4, 1, PixelLayout::OneChannel).unwrap();
        assert!(dst.iter().any(|&v| v > 0 && v < 255), "{:?}", dst);
    }

    proptest! {
        #[test]
        fn prop_resize_writes_only_destination_region(
            src_w in 1u32..40,
            src_h in 1u32..40,
            dst_w in 1u32..40,
            dst_h in 1u32..40,
            code in 0i32..=16,
        ) {
            let layout = PixelLayout::from_code(code).unwrap();
            let channels = layout.channels();
            let src = gradient(src_w, src_h, channels);
            let region = layout.buffer_len(dst_w, dst_h).unwrap();
            let mut dst = vec![0xEEu8; region + 16];

            resize_into(&src, src_w, src_h, &mut dst, dst_w, dst_h, layout).unwrap();

            prop_assert!(dst[region..].iter().all(|&b| b == 0xEE));
        }
    }
}
