// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::error::BridgeError;
use crate::image::Image;
use image::DynamicImage;
use imageproc::{edges::canny, filter::gaussian_blur_f32};
use tracing::{debug, info};

/// Gaussian smoothing strength applied before edge detection.
pub const BLUR_SIGMA: f32 = 1.5;

/// Canny hysteresis lower threshold. Gradient magnitudes below this value
/// are rejected outright.
pub const CANNY_LOW: f32 = 50.0;

/// Canny hysteresis upper threshold. Gradient magnitudes above this value
/// are accepted as edges; magnitudes between the two thresholds are accepted
/// only when connected to an accepted edge pixel.
pub const CANNY_HIGH: f32 = 150.0;

const ENGINE: &str = "imageproc 0.25";

/// Reports the bridge and processing-engine versions.
///
/// Always succeeds. Emits an info-level record so hosts can confirm from the
/// log that the native module loaded the engine it expects.
pub fn engine_version() -> String {
    let version = format!(
        "{} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        ENGINE
    );
    info!("image processing engine ready: {version}");
    version
}

/// Converts an RGBA image to grayscale.
///
/// Reduces the buffer to single-channel luminance, then expands back to
/// RGBA (intensity replicated into R, G and B, alpha forced to 255) so the
/// host's display path consumes a uniform format. The input is not
/// modified; on success a new buffer is returned.
///
/// Already-gray input (R=G=B) passes through numerically unchanged, since
/// the luminance weights sum to one.
///
/// # Errors
///
/// Returns [`BridgeError`] if the buffer cannot be handed to the engine.
pub fn grayscale(src: &Image) -> Result<Image, BridgeError> {
    let rgba = src.to_rgba()?;
    let gray = DynamicImage::ImageRgba8(rgba).to_luma8();
    let out = DynamicImage::ImageLuma8(gray).to_rgba8();
    debug!("grayscale conversion applied to {src}");
    Ok(Image::from_rgba(out))
}

/// Runs Canny edge detection over an RGBA image.
///
/// Pipeline, in order: RGBA to luminance, Gaussian smoothing with
/// [`BLUR_SIGMA`] to suppress high-frequency noise, two-threshold Canny at
/// [`CANNY_LOW`] / [`CANNY_HIGH`] with hysteresis, then expansion of the
/// binary edge map back to RGBA. Every output pixel is either
/// `(0,0,0,255)` or `(255,255,255,255)`.
///
/// The input buffer is not modified; on success a new buffer is returned.
///
/// # Errors
///
/// Returns [`BridgeError`] if the buffer cannot be handed to the engine.
pub fn canny_edges(src: &Image) -> Result<Image, BridgeError> {
    let rgba = src.to_rgba()?;
    let gray = DynamicImage::ImageRgba8(rgba).to_luma8();
    let blurred = gaussian_blur_f32(&gray, BLUR_SIGMA);
    let edges = canny(&blurred, CANNY_LOW, CANNY_HIGH);
    let out = DynamicImage::ImageLuma8(edges).to_rgba8();
    debug!("canny edge detection applied to {src}");
    Ok(Image::from_rgba(out))
}
