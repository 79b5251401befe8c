//! Channel arrangements understood by the resize boundary.

use fast_image_resize::PixelType;
use num_enum::TryFromPrimitive;

/// How (and whether) a layout carries an alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaMode {
    /// No alpha; every channel is resampled independently.
    None,
    /// Straight alpha stored in the last channel.
    Last,
    /// Straight alpha stored in the first channel.
    First,
    /// Color channels already multiplied by alpha.
    Premultiplied,
}

/// Interleaved 8-bit pixel layout, numbered the way hosts already pass it
/// (the stb_image_resize2 `stbir_pixel_layout` codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(i32)]
pub enum PixelLayout {
    Bgr = 0,
    OneChannel = 1,
    TwoChannel = 2,
    Rgb = 3,
    Rgba = 4,
    FourChannel = 5,
    Bgra = 6,
    Argb = 7,
    Abgr = 8,
    Ra = 9,
    Ar = 10,
    RgbaPremultiplied = 11,
    BgraPremultiplied = 12,
    ArgbPremultiplied = 13,
    AbgrPremultiplied = 14,
    RaPremultiplied = 15,
    ArPremultiplied = 16,
}

impl PixelLayout {
    /// Parse a host layout code; unknown codes yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::try_from(code).ok()
    }

    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::OneChannel => 1,
            PixelLayout::TwoChannel
            | PixelLayout::Ra
            | PixelLayout::Ar
            | PixelLayout::RaPremultiplied
            | PixelLayout::ArPremultiplied => 2,
            PixelLayout::Bgr | PixelLayout::Rgb => 3,
            PixelLayout::Rgba
            | PixelLayout::FourChannel
            | PixelLayout::Bgra
            | PixelLayout::Argb
            | PixelLayout::Abgr
            | PixelLayout::RgbaPremultiplied
            | PixelLayout::BgraPremultiplied
            | PixelLayout::ArgbPremultiplied
            | PixelLayout::AbgrPremultiplied => 4,
        }
    }

    pub fn alpha(self) -> AlphaMode {
        match self {
            PixelLayout::Rgba | PixelLayout::Bgra | PixelLayout::Ra => AlphaMode::Last,
            PixelLayout::Argb | PixelLayout::Abgr | PixelLayout::Ar => AlphaMode::First,
            PixelLayout::RgbaPremultiplied
            | PixelLayout::BgraPremultiplied
            | PixelLayout::ArgbPremultiplied
            | PixelLayout::AbgrPremultiplied
            | PixelLayout::RaPremultiplied
            | PixelLayout::ArPremultiplied => AlphaMode::Premultiplied,
            PixelLayout::Bgr
            | PixelLayout::OneChannel
            | PixelLayout::TwoChannel
            | PixelLayout::Rgb
            | PixelLayout::FourChannel => AlphaMode::None,
        }
    }

    /// Tightly packed buffer size for `width x height` pixels, `None` on overflow.
    pub fn buffer_len(self, width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(self.channels())
    }

    /// Resampler pixel type with the same channel count.
    pub(crate) fn pixel_type(self) -> PixelType {
        match self.channels() {
            1 => PixelType::U8,
            2 => PixelType::U8x2,
            3 => PixelType::U8x3,
            _ => PixelType::U8x4,
        }
    }
}
