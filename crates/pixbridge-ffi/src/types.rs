//! Status codes and marshaling helpers shared by the exports.
//!
//! Every export reports a bare `c_int`: [`SUCCESS`] or [`FAILURE`]. Error
//! detail from the core is logged and then dropped at this layer.

use std::fmt::Display;
use std::os::raw::c_int;
use std::panic::{self, AssertUnwindSafe};

use pixbridge_core::{DecodeError, JpegHeader};

/// Returned when the operation completed.
pub const SUCCESS: c_int = 1;
/// Returned for every failure, whatever its cause.
pub const FAILURE: c_int = 0;

/// Collapse a core result into a status code, logging the error.
pub(crate) fn report<T, E: Display>(op: &str, result: Result<T, E>) -> c_int {
    match result {
        Ok(_) => SUCCESS,
        Err(e) => {
            log::warn!("{}: {}", op, e);
            FAILURE
        }
    }
}

/// Run an export body, turning a panic into [`FAILURE`].
///
/// Unwinding across an `extern "C"` boundary aborts the host process.
pub(crate) fn guard<F>(op: &str, body: F) -> c_int
where
    F: FnOnce() -> c_int,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(status) => status,
        Err(_) => {
            log::error!("{}: panicked inside the image backend", op);
            FAILURE
        }
    }
}

/// Convert a C dimension to `u32`, mapping non-positive values to zero.
pub(crate) fn dimension(value: c_int) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

/// Write a parsed header to the caller's out-parameters.
///
/// # Safety
///
/// All three pointers must be non-null and valid for writes.
pub(crate) unsafe fn store_header(
    header: &JpegHeader,
    width: *mut c_int,
    height: *mut c_int,
    channels: *mut c_int,
) -> Result<(), DecodeError> {
    let overflow = || DecodeError::DimensionOverflow {
        width: header.width,
        height: header.height,
    };
    let w = c_int::try_from(header.width).map_err(|_| overflow())?;
    let h = c_int::try_from(header.height).map_err(|_| overflow())?;
    let c = c_int::try_from(header.channels()).map_err(|_| overflow())?;

    unsafe {
        width.write(w);
        height.write(h);
        channels.write(c);
    }
    Ok(())
}
