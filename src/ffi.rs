// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Foreign-function entry points.
//!
//! The host addresses buffers through opaque `u64` handles issued by a
//! process-global [`HandleTable`]. Entry points never unwind across the
//! boundary: processing failures and panics are caught, logged at error
//! level, and collapsed to the numeric sentinel (`0` for handle-returning
//! calls, a negative [`BridgeError::code`] for status-returning calls).
//!
//! On failure no new buffer is registered and the input buffer is left
//! untouched; a sentinel means "operation did not apply".

use crate::error::BridgeError;
use crate::handle::{Handle, HandleTable};
use crate::image::{Image, RGBA_CHANNELS};
use crate::process;
use once_cell::sync::Lazy;
use std::any::Any;
use std::ffi::{c_char, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use std::slice;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{error, info};

/// Success status for status-returning entry points.
pub const BRIDGE_OK: i32 = 0;

/// Status reported when a caller passes a null pointer.
pub const BRIDGE_NULL_POINTER: i32 = -5;

/// Status reported when a destination buffer is too small.
pub const BRIDGE_SHORT_BUFFER: i32 = -6;

/// Failure sentinel for handle-returning entry points.
const FAILURE: u64 = 0;

static TABLE: Lazy<Mutex<HandleTable>> = Lazy::new(|| Mutex::new(HandleTable::new()));

static VERSION: Lazy<CString> =
    Lazy::new(|| CString::new(process::engine_version()).unwrap_or_default());

fn table() -> MutexGuard<'static, HandleTable> {
    // A poisoned lock only means another call panicked mid-operation; the
    // table itself is still structurally valid.
    TABLE.lock().unwrap_or_else(PoisonError::into_inner)
}

fn lookup(raw: u64) -> Result<Handle, BridgeError> {
    Handle::from_raw(raw).ok_or(BridgeError::StaleHandle(raw))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}

fn run_op(raw: u64, name: &str, op: fn(&Image) -> Result<Image, BridgeError>) -> u64 {
    let result = catch_unwind(AssertUnwindSafe(|| -> Result<Handle, BridgeError> {
        let mut table = table();
        let output = op(table.get(lookup(raw)?)?)?;
        Ok(table.insert(output))
    }));

    match result {
        Ok(Ok(handle)) => handle.raw(),
        Ok(Err(err)) => {
            error!(code = err.code(), "{name} failed: {err}");
            FAILURE
        }
        Err(payload) => {
            error!("{name} panicked: {}", panic_message(payload.as_ref()));
            FAILURE
        }
    }
}

/// Installs the default log subscriber for the host process.
///
/// Respects `RUST_LOG`-style filtering and defaults to `info`. Safe to call
/// more than once; later calls are ignored.
#[no_mangle]
pub extern "C" fn bridge_init_logging() {
    crate::init_logging();
}

/// Returns the bridge and engine version as a NUL-terminated UTF-8 string.
///
/// The string is owned by the bridge and valid for the process lifetime;
/// the caller must not free it. Never fails.
#[no_mangle]
pub extern "C" fn bridge_version() -> *const c_char {
    VERSION.as_ptr()
}

/// Registers an RGBA buffer with the bridge and returns its handle.
///
/// `pixels` must point at `4 * width * height` readable bytes; the data is
/// copied, so the caller's buffer can be reused immediately.
///
/// Returns the failure sentinel (`0`) for a null pointer or invalid
/// geometry.
///
/// # Safety
///
/// The caller must guarantee `pixels` is either null or valid for reads of
/// `4 * width * height` bytes for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn bridge_register_image(
    width: u32,
    height: u32,
    pixels: *const u8,
) -> u64 {
    if pixels.is_null() {
        error!("register rejected: null pixel pointer");
        return FAILURE;
    }

    let size = match (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(RGBA_CHANNELS))
    {
        Some(size) if width > 0 && height > 0 => size,
        _ => {
            error!("register rejected: invalid dimensions {width}x{height}");
            return FAILURE;
        }
    };

    let data = unsafe { slice::from_raw_parts(pixels, size) }.to_vec();
    match Image::from_pixels(width, height, data) {
        Ok(image) => table().insert(image).raw(),
        Err(err) => {
            error!(code = err.code(), "register failed: {err}");
            FAILURE
        }
    }
}

/// Releases a registered buffer and invalidates its handle.
///
/// Returns [`BRIDGE_OK`], or the error code of [`BridgeError::StaleHandle`]
/// if the handle is unknown or already released.
#[no_mangle]
pub extern "C" fn bridge_release_image(handle: u64) -> i32 {
    let result = lookup(handle).and_then(|handle| table().remove(handle));
    match result {
        Ok(image) => {
            info!("released {image}");
            BRIDGE_OK
        }
        Err(err) => {
            error!(code = err.code(), "release failed: {err}");
            err.code()
        }
    }
}

/// Width in pixels of a registered buffer, or `0` for a stale handle.
#[no_mangle]
pub extern "C" fn bridge_image_width(handle: u64) -> u32 {
    lookup(handle)
        .and_then(|handle| table().get(handle).map(Image::width))
        .unwrap_or(0)
}

/// Height in pixels of a registered buffer, or `0` for a stale handle.
#[no_mangle]
pub extern "C" fn bridge_image_height(handle: u64) -> u32 {
    lookup(handle)
        .and_then(|handle| table().get(handle).map(Image::height))
        .unwrap_or(0)
}

/// Size in bytes of a registered buffer, or `0` for a stale handle.
#[no_mangle]
pub extern "C" fn bridge_image_size(handle: u64) -> u64 {
    lookup(handle)
        .and_then(|handle| table().get(handle).map(Image::size))
        .unwrap_or(0) as u64
}

/// Copies a registered buffer's pixels into host memory.
///
/// `capacity` is the size of the destination in bytes and must be at least
/// [`bridge_image_size`]. Returns [`BRIDGE_OK`] on success.
///
/// # Safety
///
/// The caller must guarantee `dst` is either null or valid for writes of
/// `capacity` bytes for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn bridge_read_pixels(handle: u64, dst: *mut u8, capacity: usize) -> i32 {
    if dst.is_null() {
        error!("read rejected: null destination pointer");
        return BRIDGE_NULL_POINTER;
    }

    let table = table();
    let image = match lookup(handle).and_then(|handle| table.get(handle)) {
        Ok(image) => image,
        Err(err) => {
            error!(code = err.code(), "read failed: {err}");
            return err.code();
        }
    };

    let pixels = image.as_slice();
    if capacity < pixels.len() {
        error!(
            "read rejected: destination holds {capacity} bytes, image needs {}",
            pixels.len()
        );
        return BRIDGE_SHORT_BUFFER;
    }

    unsafe { ptr::copy_nonoverlapping(pixels.as_ptr(), dst, pixels.len()) };
    BRIDGE_OK
}

/// Converts a registered RGBA buffer to grayscale.
///
/// Returns the handle of a newly registered result buffer, or the failure
/// sentinel (`0`). The input buffer is never modified; the caller remains
/// responsible for releasing both input and result.
#[no_mangle]
pub extern "C" fn bridge_grayscale(handle: u64) -> u64 {
    run_op(handle, "grayscale", process::grayscale)
}

/// Runs Canny edge detection over a registered RGBA buffer.
///
/// Returns the handle of a newly registered result buffer holding the
/// binary edge map, or the failure sentinel (`0`). The input buffer is
/// never modified; the caller remains responsible for releasing both input
/// and result.
#[no_mangle]
pub extern "C" fn bridge_canny_edge_detection(handle: u64) -> u64 {
    run_op(handle, "canny edge detection", process::canny_edges)
}
