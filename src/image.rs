// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::error::BridgeError;
use core::fmt;
use image::RgbaImage;

/// Number of bytes per RGBA pixel (8 bits per channel, with alpha).
pub const RGBA_CHANNELS: usize = 4;

const fn row_stride(width: u32) -> usize {
    RGBA_CHANNELS * width as usize
}

/// Owned RGBA image buffer processed by the bridge.
///
/// `Image` is a tightly packed, row-major RGBA8 pixel grid. Geometry is
/// validated on construction so every `Image` in circulation has non-zero
/// dimensions and a pixel buffer of exactly `4 * width * height` bytes;
/// downstream code relies on this invariant instead of re-checking.
///
/// # Example
///
/// ```
/// use edgeviewer_bridge::Image;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = Image::new(1920, 1080)?;
///
/// assert_eq!(img.width(), 1920);
/// assert_eq!(img.height(), 1080);
/// assert_eq!(img.size(), 8294400);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Allocates a zero-filled RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidDimensions`] if either dimension is
    /// zero or the total byte size overflows `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self, BridgeError> {
        let size = checked_size(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; size],
        })
    }

    /// Wraps caller-provided pixel data in an `Image`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidDimensions`] for zero or overflowing
    /// geometry, or [`BridgeError::InvalidBuffer`] if `pixels` is not
    /// exactly `4 * width * height` bytes long.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BridgeError> {
        let size = checked_size(width, height)?;
        if pixels.len() != size {
            return Err(BridgeError::InvalidBuffer {
                expected: size,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub(crate) fn from_rgba(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Copies the buffer into the processing engine's RGBA representation.
    pub(crate) fn to_rgba(&self) -> Result<RgbaImage, BridgeError> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or(
            BridgeError::InvalidBuffer {
                expected: self.size(),
                actual: self.pixels.len(),
            },
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes (always `4 * width`, rows are tightly packed).
    pub fn stride(&self) -> usize {
        row_stride(self.width)
    }

    /// Total buffer size in bytes.
    pub fn size(&self) -> usize {
        self.pixels.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}

fn checked_size(width: u32, height: u32) -> Result<usize, BridgeError> {
    if width == 0 || height == 0 {
        return Err(BridgeError::InvalidDimensions { width, height });
    }
    row_stride(width)
        .checked_mul(height as usize)
        .ok_or(BridgeError::InvalidDimensions { width, height })
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{} RGBA {} bytes",
            self.width,
            self.height,
            self.pixels.len()
        )
    }
}
