// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use thiserror::Error;

/// Errors reported by the bridge.
///
/// Every variant carries enough context to be logged on its own, and maps to
/// a stable numeric code via [`BridgeError::code`] so the foreign boundary
/// can report failures without unwinding.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Image geometry is zero-sized or would overflow the buffer size.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length does not match the declared geometry.
    #[error("pixel buffer length mismatch: expected {expected} bytes, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    /// Handle was never issued, or refers to a released slot.
    #[error("stale or unknown image handle {0:#x}")]
    StaleHandle(u64),

    /// The processing engine reported a fault.
    #[error("image processing failed: {0}")]
    Processing(String),
}

impl BridgeError {
    /// Stable status code for the foreign-function boundary.
    ///
    /// Codes are negative so that zero can remain the success value in
    /// status-returning entry points.
    pub fn code(&self) -> i32 {
        match self {
            BridgeError::InvalidDimensions { .. } => -1,
            BridgeError::InvalidBuffer { .. } => -2,
            BridgeError::StaleHandle(_) => -3,
            BridgeError::Processing(_) => -4,
        }
    }
}
