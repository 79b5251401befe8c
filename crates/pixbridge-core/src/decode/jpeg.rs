//! JPEG decoding into caller-owned RGB buffers.
//!
//! Every entry point runs the same protocol: open a session, parse the
//! header, pick the destination, decompress. The session is dropped on every
//! return path, so it is released exactly once whether the call succeeds or
//! fails, and never acquired when the payload is rejected up front.

use super::session::{ImageJpegSource, JpegSession, SessionSource};
use super::{DecodeError, DecodedImage, JpegHeader};

/// Parse the header of a JPEG payload without decompressing it.
///
/// Lets callers size the destination exactly before calling
/// [`decode_jpeg_into`].
///
/// # Errors
///
/// Returns `DecodeError::EmptyPayload` for an empty slice and
/// `DecodeError::InvalidHeader` if the header cannot be parsed.
pub fn read_jpeg_header(payload: &[u8]) -> Result<JpegHeader, DecodeError> {
    read_jpeg_header_with(&ImageJpegSource, payload)
}

/// [`read_jpeg_header`] over an explicit session source.
pub fn read_jpeg_header_with<S: SessionSource>(
    source: &S,
    payload: &[u8],
) -> Result<JpegHeader, DecodeError> {
    ensure_payload(payload)?;
    let mut session = source.open(payload)?;
    session.read_header()
}

/// Decode a JPEG payload as RGB into the front of `out`.
///
/// Writes `width * height * 3` bytes and returns the parsed header. Bytes
/// past that length are left untouched.
///
/// # Errors
///
/// Returns `DecodeError::BufferTooSmall` before any decompression if `out`
/// cannot hold the image, plus the errors of [`read_jpeg_header`] and
/// `DecodeError::DecompressFailed` for corrupt entropy-coded data.
pub fn decode_jpeg_into(payload: &[u8], out: &mut [u8]) -> Result<JpegHeader, DecodeError> {
    decode_jpeg_with(&ImageJpegSource, payload, move |header| {
        let out = out;
        let required = header.rgb_len()?;
        let capacity = out.len();
        out.get_mut(..required)
            .ok_or(DecodeError::BufferTooSmall { required, capacity })
    })
}

/// Decode a JPEG payload into a newly allocated RGB image.
pub fn decode_jpeg(payload: &[u8]) -> Result<DecodedImage, DecodeError> {
    let mut pixels = Vec::new();
    let buf = &mut pixels;
    let header = decode_jpeg_with(&ImageJpegSource, payload, move |header| {
        let buf = buf;
        buf.resize(header.rgb_len()?, 0);
        Ok(buf.as_mut_slice())
    })?;
    Ok(DecodedImage::new(header.width, header.height, pixels))
}

/// Run the decode protocol with a caller-chosen destination.
///
/// `dest` is called once with the parsed header and must return a slice of
/// exactly `header.rgb_len()` bytes. It is not called when the payload is
/// empty or the header does not parse.
pub fn decode_jpeg_with<'o, S, F>(
    source: &S,
    payload: &[u8],
    dest: F,
) -> Result<JpegHeader, DecodeError>
where
    S: SessionSource,
    F: FnOnce(&JpegHeader) -> Result<&'o mut [u8], DecodeError>,
{
    ensure_payload(payload)?;

    let mut session = source.open(payload)?;
    let header = session.read_header()?;
    let out = dest(&header)?;
    session.decompress_rgb(out)?;

    log::debug!(
        "Decoded {}x{} JPEG ({:?} source)",
        header.width,
        header.height,
        header.source_color
    );
    Ok(header)
}

fn ensure_payload(payload: &[u8]) -> Result<(), DecodeError> {
    if payload.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }
    Ok(())
}
