// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop extraction from the source raster.
//!
//! This module renders one layer's bounding box as a standalone image:
//! a 1:1 pixel copy of the corresponding source region, optionally
//! PNG-encoded for saving to disk.
//!
//! Failures here are never errors. A degenerate or out-of-frame rect, or
//! an encoder failure, yields `None` and the caller shows a placeholder.

use crate::models::layer::BoundingBox;
use crate::util::geometry::box_to_pixel_rect;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Extract the pixel region covered by `bounds` as a new raster, sized
/// exactly to the pixel rect. No scaling, no padding. Returns `None` when
/// the rect is empty or does not fit inside the source image.
pub fn extract_crop_pixels(source: &RgbaImage, bounds: &BoundingBox) -> Option<RgbaImage> {
    let rect = box_to_pixel_rect(bounds, source.width(), source.height());
    if rect.is_empty() {
        return None;
    }

    // Round the edges, not the extents, so a box touching the right or
    // bottom border still fits inside the source after rounding.
    let x0 = rect.x.round() as i64;
    let y0 = rect.y.round() as i64;
    let x1 = (rect.x + rect.width).round() as i64;
    let y1 = (rect.y + rect.height).round() as i64;
    if x0 < 0 || y0 < 0 || x1 <= x0 || y1 <= y0 {
        return None;
    }
    if x1 > source.width() as i64 || y1 > source.height() as i64 {
        return None;
    }
    let (x, y) = (x0 as u32, y0 as u32);
    let (w, h) = ((x1 - x0) as u32, (y1 - y0) as u32);

    let mut out = RgbaImage::new(w, h);
    for row in 0..h {
        for col in 0..w {
            out.put_pixel(col, row, *source.get_pixel(x + col, y + row));
        }
    }
    Some(out)
}

/// Encode a raster as PNG (lossless, alpha-capable). Returns `None` if
/// the encoder fails.
pub fn encode_png(pixels: &RgbaImage) -> Option<Vec<u8>> {
    let mut bytes = Vec::new();
    match pixels.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png) {
        Ok(()) => Some(bytes),
        Err(e) => {
            log::warn!("PNG encoding failed: {}", e);
            None
        }
    }
}

/// Extract one layer's crop as an encoded PNG, ready to save or display.
/// `None` means "crop unavailable"; callers degrade gracefully.
pub fn extract_crop(source: &RgbaImage, bounds: &BoundingBox) -> Option<Vec<u8>> {
    extract_crop_pixels(source, bounds).and_then(|pixels| encode_png(&pixels))
}

/// Derive a filesystem-safe stem from a layer label: whitespace runs
/// become single underscores.
pub fn sanitize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn test_crop_has_exact_rect_dimensions() {
        let source = checker(100, 80);
        let bounds = BoundingBox::new(0.25, 0.1, 0.75, 0.6);
        let crop = extract_crop_pixels(&source, &bounds).unwrap();
        assert_eq!(crop.width(), 50);
        assert_eq!(crop.height(), 40);
    }

    #[test]
    fn test_crop_copies_source_pixels_one_to_one() {
        let source = checker(40, 40);
        let bounds = BoundingBox::new(0.25, 0.25, 0.75, 0.75);
        let crop = extract_crop_pixels(&source, &bounds).unwrap();
        // Crop origin is (10, 10) in source space.
        for row in 0..crop.height() {
            for col in 0..crop.width() {
                assert_eq!(crop.get_pixel(col, row), source.get_pixel(col + 10, row + 10));
            }
        }
    }

    #[test]
    fn test_degenerate_box_is_unavailable() {
        let source = checker(40, 40);
        let bounds = BoundingBox::new(0.5, 0.5, 0.5, 0.5);
        assert!(extract_crop_pixels(&source, &bounds).is_none());
        assert!(extract_crop(&source, &bounds).is_none());
    }

    #[test]
    fn test_box_touching_right_and_bottom_edges_still_crops() {
        let source = checker(100, 100);
        // Rounding x and width separately would push this one past the
        // right border and lose the crop.
        let bounds = BoundingBox::new(0.0, 0.005, 1.0, 1.0);
        let crop = extract_crop_pixels(&source, &bounds).unwrap();
        assert_eq!(crop.width(), 99);
        assert_eq!(crop.height(), 100);

        let bounds = BoundingBox::new(0.005, 0.0, 1.0, 1.0);
        let crop = extract_crop_pixels(&source, &bounds).unwrap();
        assert_eq!(crop.width(), 100);
        assert_eq!(crop.height(), 99);
    }

    #[test]
    fn test_out_of_frame_box_is_unavailable() {
        let source = checker(40, 40);
        let bounds = BoundingBox::new(0.5, 0.5, 1.5, 1.5);
        assert!(extract_crop_pixels(&source, &bounds).is_none());
    }

    #[test]
    fn test_encoded_crop_is_decodable_png() {
        let source = checker(64, 64);
        let bounds = BoundingBox::new(0.0, 0.0, 0.5, 0.5);
        let bytes = extract_crop(&source, &bounds).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 32);
    }

    #[test]
    fn test_sanitize_label_replaces_whitespace() {
        assert_eq!(sanitize_label("Main Subject"), "Main_Subject");
        assert_eq!(sanitize_label("  brand   logo  "), "brand_logo");
        assert_eq!(sanitize_label("background"), "background");
    }
}
