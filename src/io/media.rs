// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! This module loads an image from disk, decoding it to RGBA for display
//! and crop extraction while keeping the original encoded bytes around
//! for the remote analysis payload.

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use std::path::Path;

/// A loaded source image: decoded pixels plus the original encoded form.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// Decoded RGBA pixels, for textures and crop extraction.
    pub rgba: RgbaImage,
    /// The file's bytes as read from disk, sent to the model unchanged.
    pub encoded: Vec<u8>,
    /// MIME type matching `encoded`.
    pub mime: &'static str,
}

/// Load and decode an image file.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let encoded = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let format = image::guess_format(&encoded)
        .with_context(|| format!("Unrecognized image format: {}", path.display()))?;
    let decoded = image::load_from_memory(&encoded)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    let rgba = decoded.to_rgba8();

    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba,
        encoded,
        mime: mime_for(format),
    })
}

fn mime_for(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        ImageFormat::Tiff => "image/tiff",
        _ => "application/octet-stream",
    }
}
