// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! # Edge Detection Viewer Bridge
//!
//! This library is the native image-processing bridge for the Edge Detection
//! Viewer host application. It marshals opaque image-buffer handles across a
//! foreign-function boundary and delegates all pixel processing to the
//! `image`/`imageproc` engine: grayscale conversion and Canny edge detection
//! over host-supplied RGBA buffers, plus a version query.
//!
//! ## Features
//!
//! - **Generation-checked handles**: buffers are addressed through a handle
//!   table rather than raw pointers, so stale or forged handles are rejected
//!   instead of dereferencing freed memory.
//! - **Pure operations**: each operation reads its input and registers a new
//!   result buffer; inputs are never mutated, so a failed call leaves the
//!   host's buffer exactly as it was.
//! - **Unwind-safe boundary**: processing faults and panics are caught,
//!   logged, and reported as numeric sentinels; nothing ever unwinds into
//!   the host runtime.
//!
//! ## Example
//!
//! ```
//! use edgeviewer_bridge::{process, HandleTable, Image};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut table = HandleTable::new();
//! let input = table.insert(Image::new(64, 48)?);
//!
//! // Run edge detection and register the result for the host.
//! let edges = process::canny_edges(table.get(input)?)?;
//! let output = table.insert(edges);
//!
//! assert_ne!(output.raw(), 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Operations are synchronous and internally single-threaded. The
//! process-global table behind the [`ffi`] entry points is mutex-guarded so
//! concurrent host calls are memory-safe, but no cross-call ordering is
//! promised.

pub mod error;
pub mod ffi;
pub mod handle;
pub mod image;
pub mod process;

pub use error::BridgeError;
pub use handle::{Handle, HandleTable};
pub use image::Image;

/// Installs the default log subscriber.
///
/// Honours `RUST_LOG`-style filtering and falls back to `info`. Later calls
/// are ignored, so hosts and tests can call this unconditionally.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
