//! Pixbridge - C ABI bindings for JPEG decoding and linear resizing
//!
//! This crate builds the `pixbridge` dynamic library a host process loads
//! to decode JPEG payloads and resize raw pixel buffers. Every export takes
//! caller-owned buffers, never allocates memory the caller must free, and
//! reports a bare `int` status: 1 for success, 0 for failure.
//!
//! # Module Structure
//!
//! - `decode` - `decode_jpeg`, `decode_jpeg_checked`, `peek_jpeg_header`, `test_turbojpeg`
//! - `resize` - `resize_image`
//! - `types` - Status codes and pointer marshaling helpers
//!
//! # Usage
//!
//! ```c
//! int w, h, c;
//! uint8_t *rgb = malloc(MAX_W * MAX_H * 3);
//! if (decode_jpeg(jpeg, jpeg_len, rgb, &w, &h, &c)) {
//!     uint8_t *thumb = malloc(256 * 256 * 3);
//!     resize_image(rgb, w, h, thumb, 256, 256, 3);
//! }
//! ```

use std::io::Write;
use std::os::raw::{c_char, c_int};

mod decode;
mod resize;
mod types;

pub use decode::{decode_jpeg, decode_jpeg_checked, peek_jpeg_header, test_turbojpeg};
pub use resize::resize_image;
pub use types::{FAILURE, SUCCESS};

static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

/// Get the library version as a static NUL-terminated string.
#[unsafe(no_mangle)]
pub extern "C" fn pixbridge_version() -> *const c_char {
    VERSION.as_ptr().cast()
}

/// Install a stderr logger for the library's diagnostics.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`. Returns 1 if the
/// logger was installed by this call and 0 if a logger was already set.
#[unsafe(no_mangle)]
pub extern "C" fn pixbridge_init_logging() -> c_int {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format(|buf, record| {
        writeln!(buf, "[pixbridge {}] {}", record.level(), record.args())
    });

    match builder.try_init() {
        Ok(()) => SUCCESS,
        Err(_) => FAILURE,
    }
}
