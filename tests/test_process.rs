// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use edgeviewer_bridge::{process, Image};
use std::error::Error;

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Image, Box<dyn Error>> {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for _ in 0..width * height {
        pixels.extend_from_slice(&rgba);
    }
    Ok(Image::from_pixels(width, height, pixels)?)
}

/// Deterministic multi-tone test pattern with opaque alpha.
fn pattern(width: u32, height: u32) -> Result<Image, Box<dyn Error>> {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[
                (x * 37 % 256) as u8,
                (y * 53 % 256) as u8,
                ((x + y) * 11 % 256) as u8,
                255,
            ]);
        }
    }
    Ok(Image::from_pixels(width, height, pixels)?)
}

#[test]
fn test_version() {
    let version = process::engine_version();
    println!("{}", version);

    assert!(!version.is_empty());
    assert!(version.contains('.'));
    assert!(version.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_grayscale_uniform_gray_unchanged() -> Result<(), Box<dyn Error>> {
    let input = solid(2, 2, [200, 200, 200, 255])?;
    let output = process::grayscale(&input)?;

    // Uniform gray stays gray: luminance weights sum to one.
    assert_eq!(output.as_slice(), input.as_slice());

    Ok(())
}

#[test]
fn test_grayscale_idempotent() -> Result<(), Box<dyn Error>> {
    let input = pattern(32, 24)?;

    let once = process::grayscale(&input)?;
    let twice = process::grayscale(&once)?;

    assert_eq!(once, twice);

    Ok(())
}

#[test]
fn test_grayscale_output_shape() -> Result<(), Box<dyn Error>> {
    let input = pattern(17, 9)?;
    let output = process::grayscale(&input)?;

    assert_eq!(output.width(), 17);
    assert_eq!(output.height(), 9);

    for px in output.as_slice().chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], 255);
    }

    Ok(())
}

#[test]
fn test_canny_output_is_binary() -> Result<(), Box<dyn Error>> {
    // Hard vertical edge between a black and a white half.
    let width = 64u32;
    let height = 64u32;
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for _ in 0..height {
        for x in 0..width {
            let v = if x < width / 2 { 0 } else { 255 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let input = Image::from_pixels(width, height, pixels)?;

    let output = process::canny_edges(&input)?;

    let mut edge_pixels = 0;
    for px in output.as_slice().chunks_exact(4) {
        assert!(
            px == [0, 0, 0, 255] || px == [255, 255, 255, 255],
            "unexpected pixel {:?}",
            px
        );
        if px[0] == 255 {
            edge_pixels += 1;
        }
    }
    println!("{} edge pixels", edge_pixels);
    assert!(edge_pixels > 0);

    Ok(())
}

#[test]
fn test_canny_flat_field_has_no_edges() -> Result<(), Box<dyn Error>> {
    let input = solid(2, 2, [200, 200, 200, 255])?;
    let output = process::canny_edges(&input)?;

    for px in output.as_slice().chunks_exact(4) {
        assert_eq!(px, [0, 0, 0, 255]);
    }

    Ok(())
}

#[test]
fn test_canny_deterministic() -> Result<(), Box<dyn Error>> {
    // Solid gray 4x4 square with one white pixel in the center.
    let mut first = solid(4, 4, [128, 128, 128, 255])?;
    let offset = (4 + 1) * 4; // row 1, column 1
    first.as_slice_mut()[offset..offset + 4].copy_from_slice(&[255, 255, 255, 255]);
    let second = first.clone();

    let a = process::canny_edges(&first)?;
    let b = process::canny_edges(&second)?;

    assert_eq!(a.as_slice(), b.as_slice());

    Ok(())
}

#[test]
fn test_operations_do_not_mutate_input() -> Result<(), Box<dyn Error>> {
    let input = pattern(16, 16)?;
    let before = input.as_slice().to_vec();

    process::grayscale(&input)?;
    process::canny_edges(&input)?;

    assert_eq!(input.as_slice(), before.as_slice());

    Ok(())
}
