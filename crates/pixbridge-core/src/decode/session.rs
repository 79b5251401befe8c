//! Decompression sessions.
//!
//! A session is the per-call decoder state for one payload. It is opened at
//! the start of a decode, used for at most one header parse and one
//! decompression, and released when it is dropped. Sessions never outlive
//! the call that opened them.

use std::io::Cursor;

use image::codecs::jpeg::JpegDecoder;
use image::{ColorType, ImageDecoder};

use super::{DecodeError, JpegHeader, SourceColor};

/// Opens decompression sessions over borrowed payloads.
pub trait SessionSource {
    /// Session type tied to the payload it reads.
    type Session<'a>: JpegSession;

    /// Acquire a session for `payload`.
    fn open<'a>(&self, payload: &'a [u8]) -> Result<Self::Session<'a>, DecodeError>;
}

/// One decompression session.
pub trait JpegSession {
    /// Parse the payload header. Repeated calls return the cached header.
    fn read_header(&mut self) -> Result<JpegHeader, DecodeError>;

    /// Decompress the payload as tightly packed RGB into `out`.
    ///
    /// `out` must be exactly `header.rgb_len()` bytes long.
    fn decompress_rgb(&mut self, out: &mut [u8]) -> Result<(), DecodeError>;
}

/// Session source backed by the `image` crate's JPEG codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageJpegSource;

impl SessionSource for ImageJpegSource {
    type Session<'a> = ImageJpegSession<'a>;

    fn open<'a>(&self, payload: &'a [u8]) -> Result<ImageJpegSession<'a>, DecodeError> {
        log::trace!("Opening JPEG session over {} bytes", payload.len());
        Ok(ImageJpegSession {
            payload,
            decoder: None,
            header: None,
        })
    }
}

/// Decompression session over a borrowed JPEG payload.
pub struct ImageJpegSession<'a> {
    payload: &'a [u8],
    decoder: Option<JpegDecoder<Cursor<&'a [u8]>>>,
    header: Option<JpegHeader>,
}

impl JpegSession for ImageJpegSession<'_> {
    fn read_header(&mut self) -> Result<JpegHeader, DecodeError> {
        if let Some(header) = self.header {
            return Ok(header);
        }

        let decoder = JpegDecoder::new(Cursor::new(self.payload))
            .map_err(|e| DecodeError::InvalidHeader(e.to_string()))?;
        let (width, height) = decoder.dimensions();
        let header = JpegHeader {
            width,
            height,
            source_color: SourceColor::from(decoder.color_type()),
        };

        self.decoder = Some(decoder);
        self.header = Some(header);
        Ok(header)
    }

    fn decompress_rgb(&mut self, out: &mut [u8]) -> Result<(), DecodeError> {
        let header = self.read_header()?;
        let required = header.rgb_len()?;
        if out.len() != required {
            return Err(DecodeError::BufferTooSmall {
                required,
                capacity: out.len(),
            });
        }

        let decoder = self
            .decoder
            .take()
            .ok_or_else(|| DecodeError::DecompressFailed("Session already consumed".into()))?;

        match decoder.color_type() {
            ColorType::Rgb8 => {
                check_total_bytes(&decoder, required)?;
                decoder
                    .read_image(out)
                    .map_err(|e| DecodeError::DecompressFailed(e.to_string()))
            }
            ColorType::L8 => {
                let pixel_count = required / 3;
                check_total_bytes(&decoder, pixel_count)?;
                let mut luma = vec![0u8; pixel_count];
                decoder
                    .read_image(&mut luma)
                    .map_err(|e| DecodeError::DecompressFailed(e.to_string()))?;
                for (rgb, &l) in out.chunks_exact_mut(3).zip(&luma) {
                    rgb.fill(l);
                }
                Ok(())
            }
            other => Err(DecodeError::UnsupportedColor(other)),
        }
    }
}

impl Drop for ImageJpegSession<'_> {
    fn drop(&mut self) {
        log::trace!("Closing JPEG session");
    }
}

/// `read_image` panics on a size mismatch, so compare up front.
fn check_total_bytes<D: ImageDecoder>(decoder: &D, expected: usize) -> Result<(), DecodeError> {
    let total = decoder.total_bytes();
    if total != expected as u64 {
        return Err(DecodeError::DecompressFailed(format!(
            "Decoder reports {} bytes, expected {}",
            total, expected
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_jpeg, encode_jpeg_luma};

    #[test]
    fn test_read_header_rgb() {
        let jpeg = encode_jpeg(&vec![90u8; 24 * 10 * 3], 24, 10, 90).unwrap();
        let mut session = ImageJpegSource.open(&jpeg).unwrap();

        let header = session.read_header().unwrap();
        assert_eq!((header.width, header.height), (24, 10));
        assert_eq!(header.source_color, SourceColor::Rgb);
    }

    #[test]
    fn test_read_header_is_cached() {
        let jpeg = encode_jpeg(&vec![90u8; 8 * 8 * 3], 8, 8, 90).unwrap();
        let mut session = ImageJpegSource.open(&jpeg).unwrap();
        let first = session.read_header().unwrap();
        let second = session.read_header().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_read_header_garbage() {
        let mut session = ImageJpegSource.open(&[0x00, 0x01, 0x02, 0x03]).unwrap();
        assert!(matches!(
            session.read_header(),
            Err(DecodeError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_decompress_grayscale_expands_to_rgb() {
        let jpeg = encode_jpeg_luma(&vec![77u8; 16 * 16], 16, 16, 95).unwrap();
        let mut session = ImageJpegSource.open(&jpeg).unwrap();

        let header = session.read_header().unwrap();
        assert_eq!(header.source_color, SourceColor::Grayscale);

        let mut out = vec![0u8; header.rgb_len().unwrap()];
        session.decompress_rgb(&mut out).unwrap();
        for px in out.chunks_exact(3) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[test]
    fn test_decompress_without_explicit_header() {
        let jpeg = encode_jpeg(&vec![10u8; 4 * 4 * 3], 4, 4, 90).unwrap();
        let mut session = ImageJpegSource.open(&jpeg).unwrap();
        let mut out = vec![0u8; 4 * 4 * 3];
        session.decompress_rgb(&mut out).unwrap();
    }

    #[test]
    fn test_decompress_wrong_length() {
        let jpeg = encode_jpeg(&vec![10u8; 4 * 4 * 3], 4, 4, 90).unwrap();
        let mut session = ImageJpegSource.open(&jpeg).unwrap();
        let mut out = vec![0u8; 10];
        assert!(matches!(
            session.decompress_rgb(&mut out),
            Err(DecodeError::BufferTooSmall {
                required: 48,
                capacity: 10
            })
        ));
    }

    #[test]
    fn test_decompress_twice_fails() {
        let jpeg = encode_jpeg(&vec![10u8; 4 * 4 * 3], 4, 4, 90).unwrap();
        let mut session = ImageJpegSource.open(&jpeg).unwrap();
        let mut out = vec![0u8; 48];
        session.decompress_rgb(&mut out).unwrap();
        assert!(matches!(
            session.decompress_rgb(&mut out),
            Err(DecodeError::DecompressFailed(_))
        ));
    }
}
