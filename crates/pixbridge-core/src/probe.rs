//! Decoder availability self-test.

use crate::decode::{decode_jpeg, DecodeError};
use crate::encode::encode_jpeg;

const PROBE_SIZE: u32 = 8;

/// Check that the JPEG decoder is usable in this process.
///
/// Encodes a small RGB image, then opens a session, parses the header and
/// decompresses it. Succeeds only if the round trip reports the encoded
/// dimensions and fills a full RGB buffer.
pub fn probe_decoder() -> Result<(), DecodeError> {
    let pixels: Vec<u8> = (0..PROBE_SIZE * PROBE_SIZE * 3)
        .map(|i| (i * 7 % 256) as u8)
        .collect();
    let jpeg = encode_jpeg(&pixels, PROBE_SIZE, PROBE_SIZE, 90)
        .map_err(|e| DecodeError::SessionUnavailable(e.to_string()))?;

    let image = decode_jpeg(&jpeg)?;
    let expected = pixels.len();
    if image.is_empty()
        || image.width != PROBE_SIZE
        || image.height != PROBE_SIZE
        || image.byte_size() != expected
    {
        return Err(DecodeError::DecompressFailed(format!(
            "Probe decoded as {}x{} ({} bytes), expected {}x{} ({} bytes)",
            image.width,
            image.height,
            image.byte_size(),
            PROBE_SIZE,
            PROBE_SIZE,
            expected
        )));
    }

    log::debug!("JPEG decoder probe succeeded");
    Ok(())
}
