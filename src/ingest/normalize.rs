// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! Selection cropping and minimum-size upscaling
//!
//! The recognition sidecar detects small tables poorly, so crops below
//! 640px on their short side are upscaled until that side is exactly 640.

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Padding added around a selection before cropping, in pixels
pub const CROP_PADDING: i64 = 20;

/// Minimum length of the shorter crop side forwarded to the engine
pub const MIN_CROP_SIDE: u32 = 640;

/// A user-selected rectangle in source-image pixel coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Selection {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("selection does not intersect the image ({width}x{height})")]
    EmptyCrop { width: u32, height: u32 },
}

/// Crop an image to a padded selection, clamped to the image bounds,
/// then upscale if the result is too small for the engine.
///
/// Clamping guarantees crop coordinates are never negative and never
/// exceed the image dimensions, whatever the caller sends.
pub fn normalize_selection(
    image: &DynamicImage,
    selection: &Selection,
) -> Result<DynamicImage, NormalizeError> {
    let (img_w, img_h) = image.dimensions();

    let left = (selection.x - CROP_PADDING).clamp(0, img_w as i64);
    let top = (selection.y - CROP_PADDING).clamp(0, img_h as i64);
    let right = (selection.x + selection.width + CROP_PADDING).clamp(0, img_w as i64);
    let bottom = (selection.y + selection.height + CROP_PADDING).clamp(0, img_h as i64);

    if right <= left || bottom <= top {
        return Err(NormalizeError::EmptyCrop {
            width: img_w,
            height: img_h,
        });
    }

    let cropped = image.crop_imm(
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    );

    Ok(upscale_if_small(cropped))
}

/// Upscale isotropically so the shorter side reaches exactly
/// [`MIN_CROP_SIDE`]. Images already large enough pass through untouched.
fn upscale_if_small(image: DynamicImage) -> DynamicImage {
    let (w, h) = image.dimensions();
    if w >= MIN_CROP_SIDE && h >= MIN_CROP_SIDE {
        return image;
    }

    let ratio = MIN_CROP_SIDE as f64 / w.min(h) as f64;
    let new_w = (w as f64 * ratio).round() as u32;
    let new_h = (h as f64 * ratio).round() as u32;

    image.resize_exact(new_w, new_h, FilterType::Lanczos3)
}
